use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::quiz::*;

/// Where the decks get created.
///
/// A presentation is created first, then filled slide by slide, then finished.
pub trait PresentationSink {
    /// Creates an empty presentation and returns its identifier.
    fn create_presentation(&mut self, title: &str) -> QuizResult<String>;

    fn create_slide(&mut self, presentation_id: &str, slide: &Slide) -> QuizResult<()>;

    /// Completes the presentation and returns where it can be found.
    fn finish(&mut self, presentation_id: &str) -> QuizResult<String>;
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SlideFile {
    pub title: String,
    pub body: String,
    #[serde(rename = "speakerNotes")]
    pub speaker_notes: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct DeckFile {
    pub title: String,
    pub slides: Vec<SlideFile>,
}

/// Writes every presentation as a JSON file in a directory.
pub struct JsonDeckSink {
    directory: PathBuf,
    pending: HashMap<String, DeckFile>,
    num_created: usize,
}

impl JsonDeckSink {
    pub fn new(directory: PathBuf) -> JsonDeckSink {
        JsonDeckSink {
            directory,
            pending: HashMap::new(),
            num_created: 0,
        }
    }
}

/// A file name out of a deck title: letters and digits are kept, everything else becomes '_'.
pub fn deck_file_name(index: usize, title: &str) -> String {
    let mut slug = String::new();
    for c in title.chars() {
        if c.is_alphanumeric() {
            slug.push(c);
        } else if !slug.ends_with('_') {
            slug.push('_');
        }
    }
    format!("{:02}_{}.json", index, slug.trim_matches('_'))
}

impl PresentationSink for JsonDeckSink {
    fn create_presentation(&mut self, title: &str) -> QuizResult<String> {
        self.num_created += 1;
        let id = deck_file_name(self.num_created, title);
        debug!("create_presentation: {:?} -> {}", title, id);
        self.pending.insert(
            id.clone(),
            DeckFile {
                title: title.to_string(),
                slides: Vec::new(),
            },
        );
        Ok(id)
    }

    fn create_slide(&mut self, presentation_id: &str, slide: &Slide) -> QuizResult<()> {
        let deck = match self.pending.get_mut(presentation_id) {
            Some(d) => d,
            None => whatever!("Unknown presentation {:?}", presentation_id),
        };
        deck.slides.push(SlideFile {
            title: slide.title.clone(),
            body: slide.body.clone(),
            speaker_notes: slide.speaker_notes.clone(),
        });
        Ok(())
    }

    fn finish(&mut self, presentation_id: &str) -> QuizResult<String> {
        let deck = match self.pending.remove(presentation_id) {
            Some(d) => d,
            None => whatever!("Unknown presentation {:?}", presentation_id),
        };
        let path = self.directory.join(presentation_id);
        let path_s = path.display().to_string();
        let contents = serde_json::to_string_pretty(&deck).context(ParsingJsonSnafu {})?;
        fs::create_dir_all(&self.directory).context(WritingOutputSnafu {
            path: self.directory.display().to_string(),
        })?;
        fs::write(&path, contents).context(WritingOutputSnafu {
            path: path_s.clone(),
        })?;
        info!("finish: wrote {} slides to {}", deck.slides.len(), path_s);
        Ok(path_s)
    }
}

/// Keeps the presentations in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub presentations: Vec<DeckFile>,
    pub finished: Vec<String>,
}

impl PresentationSink for MemorySink {
    fn create_presentation(&mut self, title: &str) -> QuizResult<String> {
        self.presentations.push(DeckFile {
            title: title.to_string(),
            slides: Vec::new(),
        });
        Ok(format!("{}", self.presentations.len() - 1))
    }

    fn create_slide(&mut self, presentation_id: &str, slide: &Slide) -> QuizResult<()> {
        let deck = match presentation_id
            .parse::<usize>()
            .ok()
            .and_then(|idx| self.presentations.get_mut(idx))
        {
            Some(d) => d,
            None => whatever!("Unknown presentation {:?}", presentation_id),
        };
        deck.slides.push(SlideFile {
            title: slide.title.clone(),
            body: slide.body.clone(),
            speaker_notes: slide.speaker_notes.clone(),
        });
        Ok(())
    }

    fn finish(&mut self, presentation_id: &str) -> QuizResult<String> {
        self.finished.push(presentation_id.to_string());
        Ok(presentation_id.to_string())
    }
}

/// Creates all the decks in the sink. Stops at the first failure.
pub fn publish_decks(decks: &[Deck], sink: &mut dyn PresentationSink) -> QuizResult<Vec<String>> {
    let mut created: Vec<String> = Vec::new();
    for deck in decks.iter() {
        let id = sink.create_presentation(&deck.title)?;
        for slide in deck.slides.iter() {
            sink.create_slide(&id, slide)?;
        }
        let location = sink.finish(&id)?;
        info!("publish_decks: {:?} -> {}", deck.title, location);
        created.push(location);
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_board::topics::run_planning;

    fn quiz_rows(topics: &[&str]) -> Vec<QuizRow> {
        let mut rows = Vec::new();
        for t in topics {
            rows.push(QuizRow::new(t, "", ""));
            for i in 1..=6 {
                rows.push(QuizRow::new(&format!("{}) {} {}", i, t, i), "yes", "easy"));
            }
            rows.push(QuizRow::default());
        }
        rows
    }

    #[test]
    fn publish_to_memory() {
        let decks = run_planning(&quiz_rows(&["A", "B", "C"]), &QuizLayout::default()).unwrap();
        let mut sink = MemorySink::default();
        let created = publish_decks(&decks, &mut sink).unwrap();
        assert_eq!(created, vec!["0".to_string(), "1".to_string()]);
        assert_eq!(sink.presentations.len(), 2);
        assert_eq!(sink.presentations[0].title, "Party Quiz - A & B");
        assert_eq!(sink.presentations[0].slides.len(), 12);
        assert_eq!(sink.presentations[1].slides.len(), 6);
        let s = &sink.presentations[1].slides[0];
        assert_eq!(s.title, "1) C");
        assert_eq!(s.body, "C 1");
        assert_eq!(s.speaker_notes, "Answer: yes\nNotes: easy");
    }

    #[test]
    fn unknown_presentation() {
        let mut sink = JsonDeckSink::new(PathBuf::from("."));
        let slide = Slide {
            title: "t".to_string(),
            body: "b".to_string(),
            speaker_notes: "".to_string(),
        };
        assert!(sink.create_slide("nope", &slide).is_err());
        assert!(sink.finish("nope").is_err());
    }

    #[test]
    fn file_names() {
        assert_eq!(
            deck_file_name(1, "Party Quiz - 1. News & 2. Movies"),
            "01_Party_Quiz_1_News_2_Movies.json"
        );
        assert_eq!(deck_file_name(12, "Témata: Hudba"), "12_Témata_Hudba.json");
    }
}
