//! Data models for exam report import
//!
//! This module contains the core data structures for representing
//! per-student exam results extracted from report files, the closed subject
//! vocabulary, and the format classification handed back by the classifier.

use crate::constants::{WRONG_ANSWERS_PER_PENALTY, subjects};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Subject Vocabulary
// =============================================================================

/// Exam subjects recognized in per-subject report columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SubjectCode {
    Turkish,
    Math,
    Science,
    SocialStudies,
    RevolutionHistory,
    ReligionCulture,
    ForeignLanguage,
}

impl SubjectCode {
    /// All subjects, in header scanning order
    pub const ALL: [SubjectCode; 7] = [
        SubjectCode::Turkish,
        SubjectCode::Math,
        SubjectCode::Science,
        SubjectCode::SocialStudies,
        SubjectCode::RevolutionHistory,
        SubjectCode::ReligionCulture,
        SubjectCode::ForeignLanguage,
    ];

    /// Short code used in exports
    pub fn code(self) -> &'static str {
        match self {
            SubjectCode::Turkish => "TRK",
            SubjectCode::Math => "MAT",
            SubjectCode::Science => "FEN",
            SubjectCode::SocialStudies => "SOS",
            SubjectCode::RevolutionHistory => "INK",
            SubjectCode::ReligionCulture => "DIN",
            SubjectCode::ForeignLanguage => "ING",
        }
    }

    /// Canonical display name
    pub fn display_name(self) -> &'static str {
        match self {
            SubjectCode::Turkish => "Türkçe",
            SubjectCode::Math => "Matematik",
            SubjectCode::Science => "Fen Bilimleri",
            SubjectCode::SocialStudies => "Sosyal Bilgiler",
            SubjectCode::RevolutionHistory => "T.C. İnkılap Tarihi ve Atatürkçülük",
            SubjectCode::ReligionCulture => "Din Kültürü ve Ahlak Bilgisi",
            SubjectCode::ForeignLanguage => "Yabancı Dil",
        }
    }

    /// Normalized long header prefixes for this subject
    pub fn synonyms(self) -> &'static [&'static str] {
        match self {
            SubjectCode::Turkish => subjects::TURKISH_SYNONYMS,
            SubjectCode::Math => subjects::MATH_SYNONYMS,
            SubjectCode::Science => subjects::SCIENCE_SYNONYMS,
            SubjectCode::SocialStudies => subjects::SOCIAL_STUDIES_SYNONYMS,
            SubjectCode::RevolutionHistory => subjects::REVOLUTION_HISTORY_SYNONYMS,
            SubjectCode::ReligionCulture => subjects::RELIGION_CULTURE_SYNONYMS,
            SubjectCode::ForeignLanguage => subjects::FOREIGN_LANGUAGE_SYNONYMS,
        }
    }

    /// Normalized short header prefixes for this subject
    pub fn abbreviations(self) -> &'static [&'static str] {
        match self {
            SubjectCode::Turkish => subjects::TURKISH_ABBREVIATIONS,
            SubjectCode::Math => subjects::MATH_ABBREVIATIONS,
            SubjectCode::Science => subjects::SCIENCE_ABBREVIATIONS,
            SubjectCode::SocialStudies => subjects::SOCIAL_STUDIES_ABBREVIATIONS,
            SubjectCode::RevolutionHistory => subjects::REVOLUTION_HISTORY_ABBREVIATIONS,
            SubjectCode::ReligionCulture => subjects::RELIGION_CULTURE_ABBREVIATIONS,
            SubjectCode::ForeignLanguage => subjects::FOREIGN_LANGUAGE_ABBREVIATIONS,
        }
    }
}

impl fmt::Display for SubjectCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Kind of count a per-subject column carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    Correct,
    Wrong,
    Blank,
    Net,
}

// =============================================================================
// Booklet Variant
// =============================================================================

/// Exam booklet (form) letter a student received
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Booklet {
    A,
    B,
    C,
    D,
}

impl Booklet {
    /// Parse an already uppercased booklet letter
    ///
    /// Anything outside the accepted letter set yields `None`.
    pub fn from_letter(letter: &str) -> Option<Self> {
        match letter {
            "A" => Some(Booklet::A),
            "B" => Some(Booklet::B),
            "C" => Some(Booklet::C),
            "D" => Some(Booklet::D),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Booklet::A => "A",
            Booklet::B => "B",
            Booklet::C => "C",
            Booklet::D => "D",
        }
    }
}

impl fmt::Display for Booklet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Result Records
// =============================================================================

/// Net score under four-choice negative marking
pub fn derive_net(correct: f64, wrong: f64) -> f64 {
    correct - wrong / WRONG_ANSWERS_PER_PENALTY
}

/// One subject's outcome for one student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonResult {
    /// Subject this result belongs to
    pub subject: SubjectCode,

    /// Canonical display name of the subject
    pub name: String,

    pub correct: f64,
    pub wrong: f64,
    pub blank: f64,

    /// Net score as supplied by the file, or derived when absent
    pub net: f64,
}

/// Per-student exam result extracted from one data row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentResult {
    /// Digits extracted from the student number cell (raw cell as fallback)
    pub student_number: String,

    /// Cleaned, locale-uppercased full name (empty when no name column)
    pub full_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub booklet: Option<Booklet>,

    pub correct: f64,
    pub wrong: f64,
    pub blank: f64,

    /// Net score as supplied by the file, or derived when absent
    pub net: f64,

    /// Raw total score
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,

    /// Official score, falling back to the raw score
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized_score: Option<f64>,

    /// Per-subject results, in subject order
    pub lessons: Vec<LessonResult>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_rank: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_rank: Option<f64>,

    /// 1-based line number, counting the header as line 1
    pub line_number: usize,

    /// Row-level validation errors
    pub errors: Vec<String>,

    /// True iff `errors` is empty and a student number was extracted
    pub is_valid: bool,
}

impl StudentResult {
    /// Recompute the validity flag from the current errors and student number
    pub fn refresh_validity(&mut self) {
        self.is_valid = self.errors.is_empty() && !self.student_number.is_empty();
    }

    /// Look up the result for a given subject
    pub fn lesson(&self, subject: SubjectCode) -> Option<&LessonResult> {
        self.lessons.iter().find(|lesson| lesson.subject == subject)
    }
}

// =============================================================================
// Format Classification
// =============================================================================

/// Broad layout of an uploaded result file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatKind {
    /// Table already holding correct/wrong/net/score values
    Report,
    /// Raw answer marks that still need scoring
    RawOptical,
    Unknown,
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FormatKind::Report => "report",
            FormatKind::RawOptical => "raw-optical",
            FormatKind::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// Classifier verdict for one file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatClassification {
    pub kind: FormatKind,

    /// Short human-readable explanation
    pub reason: String,

    /// Confidence in [0, 1]
    pub confidence: f64,
}

impl FormatClassification {
    pub fn new(kind: FormatKind, reason: impl Into<String>, confidence: f64) -> Self {
        Self {
            kind,
            reason: reason.into(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// Check whether this verdict allows report parsing
    pub fn accepts_report(&self, min_confidence: f64) -> bool {
        self.kind == FormatKind::Report && self.confidence >= min_confidence
    }
}
