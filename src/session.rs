//! Caller-owned vowel session
//!
//! A practice or survey session accumulates one measurement per vowel. The
//! analysis functions never touch a session: the caller runs the pipeline
//! and records the result here. Sessions live in memory only.

use std::collections::BTreeMap;

use crate::accuracy::{score_formants, AccuracyResult};
use crate::formant::FormantSet;
use crate::vowels::{Language, VowelTarget};

/// One recorded vowel
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedVowel {
    /// Label the vowel was recorded under (usually its IPA symbol)
    pub label: String,
    pub f1: f64,
    pub f2: f64,
    pub f3: Option<f64>,
    /// Score against the target, when a target was given
    pub accuracy: Option<AccuracyResult>,
}

/// Accumulated vowel measurements for one speaker
#[derive(Debug, Clone)]
pub struct VowelSession {
    name: String,
    language: Language,
    recordings: BTreeMap<String, RecordedVowel>,
}

impl VowelSession {
    pub fn new(name: impl Into<String>, language: Language) -> Self {
        Self {
            name: name.into(),
            language,
            recordings: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Switch language; recordings are kept
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Record a vowel, replacing any earlier recording with the same label
    ///
    /// Returns the replaced recording, if any.
    pub fn record(&mut self, vowel: RecordedVowel) -> Option<RecordedVowel> {
        self.recordings.insert(vowel.label.clone(), vowel)
    }

    /// Record the formants measured for `target`, scoring them on the way
    ///
    /// Returns the stored recording, or `None` (and records nothing) when F1
    /// or F2 was not detected.
    pub fn record_formants(
        &mut self,
        target: &VowelTarget,
        formants: &FormantSet,
        max_distance: f64,
    ) -> Option<&RecordedVowel> {
        let f1 = formants.f1()?;
        let f2 = formants.f2()?;
        let vowel = RecordedVowel {
            label: target.ipa.clone(),
            f1,
            f2,
            f3: formants.f3(),
            accuracy: score_formants(formants, target, max_distance),
        };
        let label = vowel.label.clone();
        self.recordings.insert(label.clone(), vowel);
        self.recordings.get(&label)
    }

    pub fn get(&self, label: &str) -> Option<&RecordedVowel> {
        self.recordings.get(label)
    }

    pub fn remove(&mut self, label: &str) -> Option<RecordedVowel> {
        self.recordings.remove(label)
    }

    /// Recordings ordered by label
    pub fn recordings(&self) -> impl Iterator<Item = &RecordedVowel> {
        self.recordings.values()
    }

    pub fn len(&self) -> usize {
        self.recordings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recordings.is_empty()
    }

    pub fn clear(&mut self) {
        self.recordings.clear();
    }

    /// Mean accuracy score over the scored recordings
    pub fn mean_score(&self) -> Option<f64> {
        let scores: Vec<f64> = self
            .recordings
            .values()
            .filter_map(|v| v.accuracy.map(|a| a.score))
            .collect();

        if scores.is_empty() {
            None
        } else {
            Some(scores.iter().sum::<f64>() / scores.len() as f64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn vowel(label: &str, f1: f64, f2: f64) -> RecordedVowel {
        RecordedVowel {
            label: label.to_string(),
            f1,
            f2,
            f3: None,
            accuracy: None,
        }
    }

    #[test]
    fn test_rerecording_replaces() {
        let mut session = VowelSession::new("practice", Language::AmericanEnglish);

        assert!(session.record(vowel("/i/", 300.0, 2200.0)).is_none());
        let replaced = session.record(vowel("/i/", 290.0, 2240.0)).unwrap();

        assert_eq!(replaced.f1, 300.0);
        assert_eq!(session.len(), 1);
        assert_eq!(session.get("/i/").unwrap().f1, 290.0);
    }

    #[test]
    fn test_record_formants_scores() {
        let mut session = VowelSession::new("practice", Language::AmericanEnglish);
        let target = Language::AmericanEnglish.vowel("/i/").unwrap();
        let formants = FormantSet::from_frequencies(&[280.0, 2250.0, 2900.0], 3);

        let recorded = session.record_formants(&target, &formants, 1000.0).unwrap();

        assert_eq!(recorded.label, "/i/");
        assert_eq!(recorded.f3, Some(2900.0));
        assert_eq!(recorded.accuracy.unwrap().score, 100.0);
        assert_relative_eq!(session.mean_score().unwrap(), 100.0);
    }

    #[test]
    fn test_record_formants_skips_undetected() {
        let mut session = VowelSession::new("practice", Language::Spanish);
        let target = Language::Spanish.vowel("/a/").unwrap();

        assert!(session
            .record_formants(&target, &FormantSet::absent(3), 1000.0)
            .is_none());
        assert!(session.is_empty());
        assert!(session.mean_score().is_none());
    }

    #[test]
    fn test_language_switch_keeps_recordings() {
        let mut session = VowelSession::new("survey", Language::German);
        session.record(vowel("/u/", 310.0, 790.0));
        session.set_language(Language::French);

        assert_eq!(session.language(), Language::French);
        assert_eq!(session.len(), 1);

        assert!(session.remove("/u/").is_some());
        session.record(vowel("/y/", 260.0, 1950.0));
        session.clear();
        assert!(session.is_empty());
    }
}
