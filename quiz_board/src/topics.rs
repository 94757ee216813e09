//! Partitioning of the quiz sheet into topics, and of topics into decks of slides.

use log::{debug, info, warn};
use regex::Regex;
use std::sync::LazyLock;

pub use crate::config::*;

/// A question label: digits or the letter T, followed by a dot or a closing parenthesis.
static QUESTION_LABEL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([T\d]+[.)])\s*").unwrap());

/// The numbering in front of a topic title ("1. News").
static TOPIC_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.)]\s*").unwrap());

/// Splits a question into its label and the remaining text.
///
/// Questions without a label are returned unchanged with no label.
pub fn parse_question(text: &str) -> (Option<String>, String) {
    let trimmed = text.trim();
    match QUESTION_LABEL_REGEX.captures(trimmed) {
        Some(caps) => {
            let whole = caps.get(0).map(|m| m.end()).unwrap_or(0);
            let label = caps.get(1).map(|m| m.as_str().to_string());
            (label, trimmed[whole..].trim().to_string())
        }
        None => (None, trimmed.to_string()),
    }
}

/// Removes the numbering in front of a topic title.
pub fn clean_topic_title(title: &str) -> String {
    TOPIC_NUMBER_REGEX.replace(title.trim(), "").trim().to_string()
}

/// The title of the slide for one question of a topic.
pub fn slide_title(topic_title: &str, question: &Question) -> String {
    let topic = clean_topic_title(topic_title);
    match &question.label {
        Some(label) => format!("{} {}", label, topic),
        // Malformed questions only get the topic.
        None => topic,
    }
}

fn speaker_notes(question: &Question) -> String {
    let mut lines: Vec<String> = Vec::new();
    if !question.answer.is_empty() {
        lines.push(format!("Answer: {}", question.answer));
    }
    if !question.notes.is_empty() {
        lines.push(format!("Notes: {}", question.notes));
    }
    lines.join("\n")
}

fn check_layout(layout: &QuizLayout) -> Result<(), BoardErrors> {
    if layout.questions_per_topic == 0 {
        return Err(BoardErrors::InvalidLayout(
            "a topic needs at least one question".to_string(),
        ));
    }
    if layout.topics_per_deck == 0 {
        return Err(BoardErrors::InvalidLayout(
            "a deck needs at least one topic".to_string(),
        ));
    }
    Ok(())
}

/// Groups the rows of the quiz sheet (header excluded) into topics.
///
/// A row opens a new topic when no topic is open, or when the open topic already
/// has all its questions. Every other row is a question of the open topic.
/// A blank row closes a topic that has questions, so that short topics do not
/// swallow the title of the next one.
pub fn parse_topics(rows: &[QuizRow], layout: &QuizLayout) -> Result<Vec<Topic>, BoardErrors> {
    check_layout(layout)?;
    let mut topics: Vec<Topic> = Vec::new();
    let mut open = false;
    for (idx, row) in rows.iter().enumerate() {
        if row.is_blank() {
            if open && topics.last().map_or(false, |t| !t.questions.is_empty()) {
                debug!("parse_topics: row {}: blank row closes the topic", idx);
                open = false;
            }
            continue;
        }
        let needs_topic = match topics.last() {
            Some(t) if open => t.questions.len() >= layout.questions_per_topic,
            _ => true,
        };
        if needs_topic {
            open = true;
            debug!("parse_topics: row {}: new topic {:?}", idx, row.text);
            topics.push(Topic {
                title: row.text.clone(),
                questions: Vec::new(),
            });
            continue;
        }
        let (label, body) = parse_question(&row.text);
        if label.is_none() {
            warn!(
                "parse_topics: row {}: no label found in question {:?}",
                idx, row.text
            );
        }
        let question = Question {
            label,
            body,
            answer: row.answer.clone(),
            notes: row.notes.clone(),
        };
        debug!("parse_topics: row {}: question {:?}", idx, question);
        if let Some(topic) = topics.last_mut() {
            topic.questions.push(question);
        }
    }

    // A title at the very end without any question is not a topic.
    if let Some(last) = topics.last() {
        if last.questions.is_empty() {
            warn!("parse_topics: dropping topic {:?} without questions", last.title);
            topics.pop();
        }
    }
    for t in topics.iter() {
        if t.questions.len() < layout.questions_per_topic {
            warn!(
                "parse_topics: topic {:?} has {} questions instead of {}",
                t.title,
                t.questions.len(),
                layout.questions_per_topic
            );
        }
    }
    info!("parse_topics: found {} topics", topics.len());
    Ok(topics)
}

/// Packs the topics into decks, `topics_per_deck` at a time, with one slide per question.
pub fn plan_decks(topics: &[Topic], layout: &QuizLayout) -> Result<Vec<Deck>, BoardErrors> {
    check_layout(layout)?;
    let mut decks: Vec<Deck> = Vec::new();
    for chunk in topics.chunks(layout.topics_per_deck) {
        let names: Vec<String> = chunk.iter().map(|t| t.title.clone()).collect();
        let title = format!("{} - {}", layout.deck_prefix, names.join(" & "));
        let slides: Vec<Slide> = chunk
            .iter()
            .flat_map(|t| {
                t.questions.iter().map(move |q| Slide {
                    title: slide_title(&t.title, q),
                    body: q.body.clone(),
                    speaker_notes: speaker_notes(q),
                })
            })
            .collect();
        info!("plan_decks: deck {:?} with {} slides", title, slides.len());
        decks.push(Deck {
            title,
            topics: names,
            slides,
        });
    }
    Ok(decks)
}

/// Runs the whole slide planning: rows to topics to decks.
pub fn run_planning(rows: &[QuizRow], layout: &QuizLayout) -> Result<Vec<Deck>, BoardErrors> {
    let topics = parse_topics(rows, layout)?;
    if topics.is_empty() {
        return Err(BoardErrors::EmptyQuiz);
    }
    plan_decks(&topics, layout)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic_rows(title: &str, n: usize) -> Vec<QuizRow> {
        let mut rows = vec![QuizRow::new(title, "", "")];
        for i in 1..=n {
            let label = if i == n { "T)".to_string() } else { format!("{})", i) };
            rows.push(QuizRow::new(
                &format!("{} {} question {}", label, title, i),
                &format!("answer {}", i),
                "",
            ));
        }
        rows
    }

    fn quiz(titles: &[&str]) -> Vec<QuizRow> {
        let mut rows = Vec::new();
        for t in titles {
            rows.extend(topic_rows(t, 6));
            rows.push(QuizRow::default());
        }
        rows
    }

    #[test]
    fn question_labels() {
        assert_eq!(
            parse_question("2) how are you?"),
            (Some("2)".to_string()), "how are you?".to_string())
        );
        assert_eq!(
            parse_question("T. bonus question"),
            (Some("T.".to_string()), "bonus question".to_string())
        );
        assert_eq!(
            parse_question("12.Capital of France"),
            (Some("12.".to_string()), "Capital of France".to_string())
        );
        assert_eq!(parse_question("What now?"), (None, "What now?".to_string()));
        assert_eq!(parse_question("Tell me"), (None, "Tell me".to_string()));
    }

    #[test]
    fn topic_titles() {
        assert_eq!(clean_topic_title("1. News"), "News");
        assert_eq!(clean_topic_title("3) Movies "), "Movies");
        assert_eq!(clean_topic_title("Sports"), "Sports");
    }

    #[test]
    fn missing_label_falls_back_to_topic() {
        let q = Question {
            label: None,
            body: "Who?".to_string(),
            answer: "".to_string(),
            notes: "".to_string(),
        };
        assert_eq!(slide_title("2. History", &q), "History");
    }

    #[test]
    fn topics_of_six_questions() {
        let layout = QuizLayout::default();
        let topics = parse_topics(&quiz(&["1. News", "2. Movies", "3. Music"]), &layout).unwrap();
        assert_eq!(topics.len(), 3);
        assert!(topics.iter().all(|t| t.questions.len() == 6));
        assert_eq!(topics[1].title, "2. Movies");
        assert_eq!(topics[1].questions[5].label, Some("T)".to_string()));
    }

    #[test]
    fn topics_without_blank_separators() {
        let layout = QuizLayout::default();
        let mut rows = topic_rows("A", 6);
        rows.extend(topic_rows("B", 6));
        let topics = parse_topics(&rows, &layout).unwrap();
        assert_eq!(topics.len(), 2);
        assert_eq!(topics[1].title, "B");
    }

    #[test]
    fn decks_pair_topics() {
        let layout = QuizLayout::default();
        let decks = run_planning(&quiz(&["1. News", "2. Movies", "3. Music"]), &layout).unwrap();
        assert_eq!(decks.len(), 2);
        assert_eq!(decks[0].title, "Party Quiz - 1. News & 2. Movies");
        assert_eq!(decks[0].slides.len(), 12);
        assert_eq!(decks[1].title, "Party Quiz - 3. Music");
        assert_eq!(decks[1].slides.len(), 6);
        let first = &decks[0].slides[0];
        assert_eq!(first.title, "1) News");
        assert_eq!(first.body, "1. News question 1");
        assert_eq!(first.speaker_notes, "Answer: answer 1");
        assert_eq!(decks[1].slides[5].title, "T) Music");
    }

    #[test]
    fn blank_row_closes_short_topic() {
        let layout = QuizLayout::default();
        let mut rows = topic_rows("1. News", 5);
        rows.push(QuizRow::default());
        rows.extend(topic_rows("2. Movies", 6));
        let topics = parse_topics(&rows, &layout).unwrap();
        assert_eq!(topics.len(), 2);
        assert_eq!(topics[0].title, "1. News");
        assert_eq!(topics[0].questions.len(), 5);
        assert_eq!(topics[0].questions[4].body, "1. News question 5");
        assert_eq!(topics[1].title, "2. Movies");
        assert_eq!(topics[1].questions.len(), 6);
        assert_eq!(topics[1].questions[0].body, "2. Movies question 1");
    }

    #[test]
    fn blank_row_after_title_keeps_topic_open() {
        let layout = QuizLayout::default();
        let mut rows = vec![QuizRow::new("Sports", "", ""), QuizRow::default()];
        rows.extend(topic_rows("Sports", 6).into_iter().skip(1));
        let topics = parse_topics(&rows, &layout).unwrap();
        assert_eq!(topics.len(), 1);
        assert_eq!(topics[0].title, "Sports");
        assert_eq!(topics[0].questions.len(), 6);
    }

    #[test]
    fn trailing_title_is_dropped() {
        let layout = QuizLayout::default();
        let mut rows = quiz(&["A"]);
        rows.push(QuizRow::new("B", "", ""));
        let topics = parse_topics(&rows, &layout).unwrap();
        assert_eq!(topics.len(), 1);
    }

    #[test]
    fn empty_quiz() {
        let layout = QuizLayout::default();
        assert_eq!(
            run_planning(&[QuizRow::default()], &layout),
            Err(BoardErrors::EmptyQuiz)
        );
    }

    #[test]
    fn invalid_layout() {
        let layout = QuizLayout {
            topics_per_deck: 0,
            ..QuizLayout::default()
        };
        assert!(matches!(
            run_planning(&quiz(&["A"]), &layout),
            Err(BoardErrors::InvalidLayout(_))
        ));
    }
}
