//! Column role inference for report headers
//!
//! This module maps normalized header tokens onto semantic roles: identity
//! fields, aggregate counts and scores, rankings, and per-subject counts.
//! Matching is deliberately permissive. Each role keeps the first column
//! that matches it, but a single column may satisfy several independent
//! role predicates and is then recorded under each of them.

use std::collections::{BTreeMap, HashMap};

use crate::app::models::{FieldKind, SubjectCode};
use crate::constants::{self, field_keywords, messages};

/// Semantic meaning of a report column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnRole {
    StudentNumber,
    FullName,
    ClassCode,
    Booklet,
    Correct,
    Wrong,
    Blank,
    Net,
    RawScore,
    NormalizedScore,
    OverallRank,
    ClassRank,
}

impl ColumnRole {
    /// Roles in header scanning order: identity, aggregate, ranking
    pub const SCAN_ORDER: [ColumnRole; 12] = [
        ColumnRole::StudentNumber,
        ColumnRole::FullName,
        ColumnRole::ClassCode,
        ColumnRole::Booklet,
        ColumnRole::Correct,
        ColumnRole::Wrong,
        ColumnRole::Blank,
        ColumnRole::Net,
        ColumnRole::RawScore,
        ColumnRole::NormalizedScore,
        ColumnRole::OverallRank,
        ColumnRole::ClassRank,
    ];

    /// Normalized header tokens accepted for this role
    pub fn synonyms(self) -> &'static [&'static str] {
        match self {
            ColumnRole::StudentNumber => constants::STUDENT_NUMBER_HEADERS,
            ColumnRole::FullName => constants::FULL_NAME_HEADERS,
            ColumnRole::ClassCode => constants::CLASS_CODE_HEADERS,
            ColumnRole::Booklet => constants::BOOKLET_HEADERS,
            ColumnRole::Correct => constants::CORRECT_COUNT_HEADERS,
            ColumnRole::Wrong => constants::WRONG_COUNT_HEADERS,
            ColumnRole::Blank => constants::BLANK_COUNT_HEADERS,
            ColumnRole::Net => constants::NET_SCORE_HEADERS,
            ColumnRole::RawScore => constants::RAW_SCORE_HEADERS,
            ColumnRole::NormalizedScore => constants::NORMALIZED_SCORE_HEADERS,
            ColumnRole::OverallRank => constants::OVERALL_RANK_HEADERS,
            ColumnRole::ClassRank => constants::CLASS_RANK_HEADERS,
        }
    }

    pub fn matches(self, token: &str) -> bool {
        self.synonyms().contains(&token)
    }
}

/// Column indices of one subject's count fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubjectColumns {
    pub correct: Option<usize>,
    pub wrong: Option<usize>,
    pub blank: Option<usize>,
    pub net: Option<usize>,
}

impl SubjectColumns {
    pub fn get(&self, kind: FieldKind) -> Option<usize> {
        match kind {
            FieldKind::Correct => self.correct,
            FieldKind::Wrong => self.wrong,
            FieldKind::Blank => self.blank,
            FieldKind::Net => self.net,
        }
    }

    /// Record a column for a field kind unless one is already recorded
    fn assign(&mut self, kind: FieldKind, index: usize) {
        let slot = match kind {
            FieldKind::Correct => &mut self.correct,
            FieldKind::Wrong => &mut self.wrong,
            FieldKind::Blank => &mut self.blank,
            FieldKind::Net => &mut self.net,
        };
        slot.get_or_insert(index);
    }
}

/// Mapping from semantic roles to zero-based column indices
#[derive(Debug, Clone, Default)]
pub struct ColumnRoleMap {
    roles: HashMap<ColumnRole, usize>,
    subjects: BTreeMap<SubjectCode, SubjectColumns>,
}

impl ColumnRoleMap {
    /// Analyze normalized header tokens, scanning columns left to right
    pub fn analyze(tokens: &[String]) -> Self {
        let mut map = ColumnRoleMap::default();

        for (index, token) in tokens.iter().enumerate() {
            for role in ColumnRole::SCAN_ORDER {
                if role.matches(token) {
                    map.roles.entry(role).or_insert(index);
                }
            }

            if let Some((subject, kind)) = match_subject_column(token) {
                map.subjects.entry(subject).or_default().assign(kind, index);
            }
        }

        map
    }

    /// Get the column index mapped to a role
    pub fn get(&self, role: ColumnRole) -> Option<usize> {
        self.roles.get(&role).copied()
    }

    pub fn has(&self, role: ColumnRole) -> bool {
        self.roles.contains_key(&role)
    }

    /// Subjects with at least one mapped column, in subject order
    pub fn subjects(&self) -> impl Iterator<Item = (SubjectCode, &SubjectColumns)> {
        self.subjects.iter().map(|(subject, columns)| (*subject, columns))
    }

    /// File-level warnings for missing critical columns
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if !self.has(ColumnRole::StudentNumber) {
            warnings.push(messages::MISSING_STUDENT_NUMBER_COLUMN.to_string());
        }
        if !self.has(ColumnRole::FullName) {
            warnings.push(messages::MISSING_NAME_COLUMN.to_string());
        }
        if !self.has(ColumnRole::Net) && !self.has(ColumnRole::Correct) {
            warnings.push(messages::MISSING_SCORE_COLUMNS.to_string());
        }

        warnings
    }

    /// Get statistics about the mapping: (mapped roles, detected subjects)
    pub fn stats(&self) -> (usize, usize) {
        (self.roles.len(), self.subjects.len())
    }
}

/// Match a token of the form `<subject prefix>_<field suffix>`
///
/// Long synonyms are tried before abbreviations. A prefix hit whose suffix
/// names no field kind does not end the search.
pub fn match_subject_column(token: &str) -> Option<(SubjectCode, FieldKind)> {
    for subject in SubjectCode::ALL {
        let prefixes = subject.synonyms().iter().chain(subject.abbreviations());
        for prefix in prefixes {
            let Some(suffix) = token
                .strip_prefix(prefix)
                .and_then(|rest| rest.strip_prefix('_'))
            else {
                continue;
            };

            if let Some(kind) = classify_field_suffix(suffix) {
                return Some((subject, kind));
            }
        }
    }

    None
}

/// Infer the field kind from a per-subject header suffix
///
/// A suffix qualifies when it contains the field keyword anywhere, is the
/// keyword's initial on its own, or ends in `_<initial>`.
pub fn classify_field_suffix(suffix: &str) -> Option<FieldKind> {
    let candidates = [
        (FieldKind::Correct, field_keywords::CORRECT, "d"),
        (FieldKind::Wrong, field_keywords::WRONG, "y"),
        (FieldKind::Blank, field_keywords::BLANK, "b"),
        (FieldKind::Net, field_keywords::NET, "n"),
    ];

    candidates
        .into_iter()
        .find(|(_, keyword, initial)| {
            suffix.contains(keyword)
                || suffix == *initial
                || suffix
                    .strip_suffix(initial)
                    .is_some_and(|rest| rest.ends_with('_'))
        })
        .map(|(kind, _, _)| kind)
}
