//! The `wordquiz quiz` command: an interactive terminal session.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};

use wordquiz_core::achievement::{qualifies, Achievement, LoggingNotifier};
use wordquiz_core::results::Progress;
use wordquiz_core::traits::AchievementNotifier;
use wordquiz_core::{QuizEngine, SessionMode, UserProfile};

use super::{build_engine, ProviderArgs};

/// Profile fields given on the command line; missing ones are prompted for.
#[derive(Debug, Default)]
pub struct ProfileArgs {
    pub name: Option<String>,
    pub level: Option<String>,
    pub goal: Option<String>,
}

/// Final tally printed at the end of a quiz.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuizSummary {
    pub correct: u32,
    pub total: u32,
    pub accuracy: f64,
}

pub async fn execute(
    name: Option<String>,
    level: Option<String>,
    goal: Option<String>,
    mode: SessionMode,
    args: ProviderArgs,
) -> Result<()> {
    let config = args.load_config()?;
    let engine = build_engine(&config, &args)?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();

    run(
        &engine,
        &LoggingNotifier,
        ProfileArgs { name, level, goal },
        mode,
        &mut input,
        &mut output,
    )
    .await?;
    Ok(())
}

/// Drive one quiz from profile setup to the final result.
pub async fn run<R: BufRead, W: Write>(
    engine: &QuizEngine,
    notifier: &dyn AchievementNotifier,
    profile: ProfileArgs,
    mode: SessionMode,
    input: &mut R,
    output: &mut W,
) -> Result<QuizSummary> {
    writeln!(output, "英単語学習CLIアプリへようこそ！")?;

    let profile = collect_profile(profile, input, output)?;
    let profile = engine.setup_profile(profile).await?;
    writeln!(output, "\n{}さん、こんにちは！", profile.name)?;
    writeln!(
        output,
        "あなたの英語レベルは {}、目標は {} ですね。",
        profile.level, profile.goal
    )?;

    let start = engine.start_session(&profile.name, mode).await?;
    match mode {
        SessionMode::Test => {
            writeln!(output, "\n--- テストモード開始 ({}問) ---", start.total_questions)?
        }
        SessionMode::Learning => {
            writeln!(output, "\n--- 学習モード開始 ---")?;
            writeln!(output, "q で終了します。")?;
        }
    }
    writeln!(output, "番号か意味を入力して答えてください。")?;

    let mut word = start.word;
    let mut options = start.options;
    let mut question = 1;

    let summary = loop {
        writeln!(output, "\nQ{question}: {word}")?;
        for (i, option) in options.iter().enumerate() {
            writeln!(output, "  {}. {option}", i + 1)?;
        }

        let Some(line) = prompt(input, output, "回答: ")? else {
            if mode == SessionMode::Learning {
                break end_learning(engine, &profile.name).await?;
            }
            bail!("input ended before the test was finished");
        };
        if mode == SessionMode::Learning && line == "q" {
            break end_learning(engine, &profile.name).await?;
        }

        let answer = resolve_answer(&line, &options);
        let outcome = engine.submit_answer(&profile.name, &word, answer).await?;
        writeln!(output, "{}", outcome.feedback)?;
        writeln!(output, "解説: {}", outcome.explanation)?;
        writeln!(output, "スコア: {}", outcome.score)?;

        match outcome.progress {
            Progress::Next {
                next_word,
                next_options,
            } => {
                word = next_word;
                options = next_options;
                question += 1;
            }
            Progress::Finished { final_accuracy, .. } => {
                if mode == SessionMode::Learning {
                    break end_learning(engine, &profile.name).await?;
                }
                break QuizSummary {
                    correct: outcome.score.correct,
                    total: outcome.score.total,
                    accuracy: final_accuracy.unwrap_or(0.0),
                };
            }
        }
    };

    writeln!(output, "\n--- 学習モード終了 ---")?;
    writeln!(
        output,
        "結果: {}問中 {}問正解 ({:.2}%)",
        summary.total, summary.correct, summary.accuracy
    )?;

    if qualifies(summary.accuracy) {
        offer_achievement(notifier, &profile, summary.accuracy, input, output).await?;
    }

    Ok(summary)
}

async fn end_learning(engine: &QuizEngine, user_name: &str) -> Result<QuizSummary> {
    let end = engine.end_learning_session(user_name).await?;
    Ok(QuizSummary {
        correct: end.correct_answers,
        total: end.total_questions,
        accuracy: end.final_accuracy,
    })
}

async fn offer_achievement<R: BufRead, W: Write>(
    notifier: &dyn AchievementNotifier,
    profile: &UserProfile,
    accuracy: f64,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    writeln!(output, "\n素晴らしい！目標達成です！")?;
    let choice = prompt(input, output, "この学習成果を記録しますか？ (y/n): ")?;
    if !choice.is_some_and(|c| c.eq_ignore_ascii_case("y")) {
        writeln!(output, "記録をスキップしました。")?;
        return Ok(());
    }

    let achievement = Achievement::for_profile(profile, accuracy);
    writeln!(output, "ユーザーID: {}", achievement.user_id)?;
    writeln!(output, "学習内容: {}", achievement.content)?;
    writeln!(output, "正解率: {:.2}%", achievement.accuracy)?;

    // Recording is best-effort; a failure never fails the quiz.
    match notifier.notify(&achievement).await {
        Ok(ack) if ack.accepted => writeln!(output, "記録が完了しました！")?,
        Ok(ack) => writeln!(output, "記録は受け付けられませんでした: {}", ack.note)?,
        Err(e) => {
            tracing::warn!(error = %e, "achievement notification failed");
            writeln!(output, "記録に失敗しました: {e}")?;
        }
    }
    Ok(())
}

fn collect_profile<R: BufRead, W: Write>(
    args: ProfileArgs,
    input: &mut R,
    output: &mut W,
) -> Result<UserProfile> {
    let mut field = |given: Option<String>, question: &str| -> Result<String> {
        if let Some(value) = given {
            return Ok(value);
        }
        match prompt(input, output, question)? {
            Some(value) => Ok(value),
            None => bail!("input ended while setting up the profile"),
        }
    };

    let name = field(args.name, "お名前を教えてください: ")?;
    let level = field(
        args.level,
        "現在の英語レベルを教えてください（例: 初級、中級、上級）: ",
    )?;
    let goal = field(
        args.goal,
        "学習目標を教えてください（例: TOEIC 800点、日常会話、ビジネス英語）: ",
    )?;
    Ok(UserProfile::new(name, level, goal))
}

/// Print `question` and read one trimmed line. `None` on end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> Result<Option<String>> {
    write!(output, "{question}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// A 1-based option number selects that option; anything else is the answer.
fn resolve_answer<'a>(line: &'a str, options: &'a [String]) -> &'a str {
    line.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| options.get(i))
        .map_or(line, String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use wordquiz_core::achievement::Acknowledgement;
    use wordquiz_core::generator::{GeneratorConfig, LlmWordSource};
    use wordquiz_core::QuizEngineConfig;
    use wordquiz_providers::mock::MockProvider;

    #[derive(Default)]
    struct RecordingNotifier {
        seen: Mutex<Vec<Achievement>>,
    }

    #[async_trait]
    impl AchievementNotifier for RecordingNotifier {
        async fn notify(&self, achievement: &Achievement) -> anyhow::Result<Acknowledgement> {
            self.seen.lock().unwrap().push(achievement.clone());
            Ok(Acknowledgement {
                achievement_id: achievement.id,
                accepted: true,
                note: String::new(),
            })
        }
    }

    fn engine() -> QuizEngine {
        let source = LlmWordSource::new(
            Arc::new(MockProvider::default()),
            GeneratorConfig::default(),
        );
        QuizEngine::new(Arc::new(source), QuizEngineConfig::default())
    }

    fn aki() -> ProfileArgs {
        ProfileArgs {
            name: Some("Aki".into()),
            level: Some("中級".into()),
            goal: Some("TOEIC 800".into()),
        }
    }

    // Correct option numbers for the mock provider's five words, twice over.
    const PERFECT_TEST: &str = "1\n2\n3\n4\n1\n1\n2\n3\n4\n1\n";

    #[test]
    fn answer_by_number_or_text() {
        let options: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
        assert_eq!(resolve_answer("2", &options), "b");
        assert_eq!(resolve_answer("0", &options), "0");
        assert_eq!(resolve_answer("5", &options), "5");
        assert_eq!(resolve_answer("c", &options), "c");
    }

    #[tokio::test]
    async fn perfect_test_offers_achievement() {
        let engine = engine();
        let notifier = RecordingNotifier::default();
        let mut input = Cursor::new(format!("{PERFECT_TEST}y\n"));
        let mut output = Vec::new();

        let summary = run(
            &engine,
            &notifier,
            aki(),
            SessionMode::Test,
            &mut input,
            &mut output,
        )
        .await
        .unwrap();

        assert_eq!(summary.correct, 10);
        assert_eq!(summary.total, 10);
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("結果: 10問中 10問正解 (100.00%)"));
        assert!(text.contains("記録が完了しました！"));

        let seen = notifier.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].content, "英単語学習（中級レベル）");
    }

    #[tokio::test]
    async fn low_score_skips_achievement() {
        let engine = engine();
        let notifier = RecordingNotifier::default();
        let mut input = Cursor::new("x\n".repeat(10));
        let mut output = Vec::new();

        let summary = run(
            &engine,
            &notifier,
            aki(),
            SessionMode::Test,
            &mut input,
            &mut output,
        )
        .await
        .unwrap();

        assert_eq!(summary.correct, 0);
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("結果: 10問中 0問正解 (0.00%)"));
        assert!(!text.contains("記録しますか"));
        assert!(notifier.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn declining_skips_recording() {
        let engine = engine();
        let notifier = RecordingNotifier::default();
        let mut input = Cursor::new(format!("{PERFECT_TEST}n\n"));
        let mut output = Vec::new();

        run(
            &engine,
            &notifier,
            aki(),
            SessionMode::Test,
            &mut input,
            &mut output,
        )
        .await
        .unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("記録をスキップしました。"));
        assert!(notifier.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn learning_mode_prompts_for_profile_and_quits_on_q() {
        let engine = engine();
        let notifier = RecordingNotifier::default();
        let mut input = Cursor::new("Aki\n初級\n日常会話\nどこにでもある、偏在する\nq\n");
        let mut output = Vec::new();

        let summary = run(
            &engine,
            &notifier,
            ProfileArgs::default(),
            SessionMode::Learning,
            &mut input,
            &mut output,
        )
        .await
        .unwrap();

        // Learning sessions only count questions once a batch is topped up.
        assert_eq!(summary.correct, 1);
        assert_eq!(summary.total, 0);
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Akiさん、こんにちは！"));
        assert!(text.contains("正解！"));
        assert!(text.contains("Q2: ephemeral"));
        assert!(engine.session("Aki").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_mode_fails_on_early_end_of_input() {
        let engine = engine();
        let notifier = RecordingNotifier::default();
        let mut input = Cursor::new("1\n");
        let mut output = Vec::new();

        let err = run(
            &engine,
            &notifier,
            aki(),
            SessionMode::Test,
            &mut input,
            &mut output,
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("input ended"));
    }
}
