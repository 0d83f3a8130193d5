//! `upskiller quiz`: five AI-literacy questions, scored on the spot.

use upskiller_tutor::{grade, QuizQuestion};

use super::{CmdResult, LearnerArgs, Prompter, Session};

const LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

/// `"b"` → 1. Anything else is a skipped answer.
fn parse_choice(input: &str, options: usize) -> Option<usize> {
    let c = input.trim().chars().next()?.to_ascii_uppercase();
    LETTERS
        .iter()
        .position(|&l| l == c)
        .or_else(|| c.to_digit(10).and_then(|d| (d as usize).checked_sub(1)))
        .filter(|&i| i < options)
}

fn print_question(n: usize, q: &QuizQuestion) {
    println!("Q{n}. {}", q.question);
    for (i, option) in q.options.iter().enumerate() {
        let label = LETTERS.get(i).copied().unwrap_or('?');
        println!("   {label}) {option}");
    }
}

pub async fn run(learner: &LearnerArgs) -> CmdResult {
    let session = Session::load(learner)?;
    let tutor = session.tutor();

    println!("📝 Generating an AI-literacy quiz for {}...\n", session.role);
    let questions = tutor.generate_quiz(session.role, session.level).await?;
    if questions.is_empty() {
        println!("Failed to generate a quiz from the model reply. Please try again.");
        return Ok(());
    }

    let mut prompter = Prompter::stdin();
    let mut answers = Vec::with_capacity(questions.len());
    for (i, q) in questions.iter().enumerate() {
        print_question(i + 1, q);
        let answer = prompter.ask("   Your answer > ").await?;
        answers.push(answer.and_then(|a| parse_choice(&a, q.options.len())));
        println!();
    }

    let outcome = grade(&questions, &answers);
    println!("Score: {}/{}", outcome.score, outcome.total);
    if outcome.is_strong() {
        println!("🎉 Excellent! You have a strong grasp of AI in logistics.");
    } else {
        println!("Keep learning! Review the roadmap to improve your score.");
    }

    println!("\nReview:");
    for (i, review) in outcome.reviews.iter().enumerate() {
        let mark = if review.is_correct { "✅" } else { "❌" };
        println!("  {mark} Q{}: {}", i + 1, review.question);
        if !review.is_correct {
            println!(
                "     Your answer: {}",
                review.chosen.as_deref().unwrap_or("(none)")
            );
            println!("     Correct:     {}", review.correct);
        }
    }
    println!("\nUse `upskiller report --score {}` to include this in your report.", outcome.score);

    Ok(())
}
