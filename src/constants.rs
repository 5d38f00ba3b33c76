//! Application constants for the exam report importer
//!
//! This module contains the fixed header vocabulary, subject tables and
//! diagnostic message texts used throughout the importer. All tables are
//! immutable and matched against normalized header tokens (see
//! [`crate::app::services::report_parser::header::normalize_header`]).

// =============================================================================
// Identity Column Synonyms
// =============================================================================

/// Header tokens recognized as the student number column
pub const STUDENT_NUMBER_HEADERS: &[&str] = &[
    "ogrenci_no",
    "ogrencino",
    "ogr_no",
    "ogrno",
    "ogrenci_numarasi",
    "okul_no",
    "okulno",
    "numara",
    "numarasi",
    "no",
];

/// Header tokens recognized as the full name column
pub const FULL_NAME_HEADERS: &[&str] = &[
    "ad_soyad",
    "adsoyad",
    "adi_soyadi",
    "ad_soyadi",
    "adisoyadi",
    "ogrenci_adi",
    "ogrenci_adi_soyadi",
    "ogrenci",
    "isim",
    "isim_soyisim",
    "ad",
];

/// Header tokens recognized as the class code column
pub const CLASS_CODE_HEADERS: &[&str] = &["sinif", "sinifi", "sube", "sinif_sube", "sinif_subesi"];

/// Header tokens recognized as the booklet variant column
pub const BOOKLET_HEADERS: &[&str] = &[
    "kitapcik",
    "kitapcik_turu",
    "kitapcik_tipi",
    "kitapcik_tur",
    "kt",
    "grup",
];

// =============================================================================
// Aggregate Column Synonyms
// =============================================================================

/// Header tokens recognized as the total correct-answer count
pub const CORRECT_COUNT_HEADERS: &[&str] = &[
    "dogru",
    "toplam_dogru",
    "dogru_sayisi",
    "top_dogru",
    "d",
];

/// Header tokens recognized as the total wrong-answer count
pub const WRONG_COUNT_HEADERS: &[&str] = &[
    "yanlis",
    "toplam_yanlis",
    "yanlis_sayisi",
    "top_yanlis",
    "y",
];

/// Header tokens recognized as the total blank-answer count
pub const BLANK_COUNT_HEADERS: &[&str] = &["bos", "toplam_bos", "bos_sayisi", "top_bos", "b"];

/// Header tokens recognized as the total net score
pub const NET_SCORE_HEADERS: &[&str] = &["net", "toplam_net", "net_toplam", "top_net", "genel_net"];

/// Header tokens recognized as the raw total score
pub const RAW_SCORE_HEADERS: &[&str] = &["puan", "toplam_puan", "ham_puan", "puani", "sinav_puani"];

/// Header tokens recognized as the normalized (official) score
pub const NORMALIZED_SCORE_HEADERS: &[&str] = &[
    "lgs_puan",
    "lgs_puani",
    "standart_puan",
    "resmi_puan",
    "yerlesme_puani",
    "agirlikli_puan",
];

// =============================================================================
// Ranking Column Synonyms
// =============================================================================

/// Header tokens recognized as the overall rank
pub const OVERALL_RANK_HEADERS: &[&str] = &[
    "genel_sira",
    "sira",
    "siralama",
    "genel_siralama",
    "derece",
    "genel_derece",
];

/// Header tokens recognized as the in-class rank
pub const CLASS_RANK_HEADERS: &[&str] = &[
    "sinif_sira",
    "sinif_sirasi",
    "sinif_siralama",
    "sube_sira",
    "sinif_derece",
];

// =============================================================================
// Subject Vocabulary
// =============================================================================

/// Subject header prefixes, as long synonyms and short abbreviations
///
/// A per-subject column header has the shape `<synonym>_<field>` or
/// `<abbreviation>_<field>` once normalized. Long synonyms are listed
/// longest first so the most specific prefix is tried before its shorter
/// forms.
pub mod subjects {
    pub const TURKISH_SYNONYMS: &[&str] = &["turkce", "turk_dili"];
    pub const TURKISH_ABBREVIATIONS: &[&str] = &["trk", "tr"];

    pub const MATH_SYNONYMS: &[&str] = &["matematik"];
    pub const MATH_ABBREVIATIONS: &[&str] = &["mat"];

    pub const SCIENCE_SYNONYMS: &[&str] = &["fen_bilimleri", "fen_bilgisi", "fen"];
    pub const SCIENCE_ABBREVIATIONS: &[&str] = &["fb"];

    pub const SOCIAL_STUDIES_SYNONYMS: &[&str] = &["sosyal_bilgiler", "sosyal"];
    pub const SOCIAL_STUDIES_ABBREVIATIONS: &[&str] = &["sos", "sb"];

    pub const REVOLUTION_HISTORY_SYNONYMS: &[&str] = &["inkilap_tarihi", "inkilap", "tarih"];
    pub const REVOLUTION_HISTORY_ABBREVIATIONS: &[&str] = &["ink", "ita"];

    pub const RELIGION_CULTURE_SYNONYMS: &[&str] = &["din_kulturu", "din"];
    pub const RELIGION_CULTURE_ABBREVIATIONS: &[&str] = &["dkab", "dk"];

    pub const FOREIGN_LANGUAGE_SYNONYMS: &[&str] = &["yabanci_dil", "ingilizce", "almanca"];
    pub const FOREIGN_LANGUAGE_ABBREVIATIONS: &[&str] = &["ing", "ydl", "yd"];
}

/// Field-kind keywords searched for in the suffix of a per-subject header
pub mod field_keywords {
    pub const CORRECT: &str = "dogru";
    pub const WRONG: &str = "yanlis";
    pub const BLANK: &str = "bos";
    pub const NET: &str = "net";
}

// =============================================================================
// Scoring
// =============================================================================

/// Wrong answers cancelling one correct answer (four-choice negative marking)
pub const WRONG_ANSWERS_PER_PENALTY: f64 = 3.0;

/// Minimum number of non-blank lines (header + one data row)
pub const MIN_REPORT_LINES: usize = 2;

// =============================================================================
// Diagnostic Messages
// =============================================================================

/// Diagnostic texts attached to parse outcomes
pub mod messages {
    pub const INSUFFICIENT_LINES: &str =
        "File must contain a header row and at least one data row";
    pub const MISSING_STUDENT_NUMBER_COLUMN: &str =
        "Student number column not found; will fall back to first column";
    pub const MISSING_NAME_COLUMN: &str = "Name column not found; names will be left empty";
    pub const MISSING_SCORE_COLUMNS: &str =
        "Neither a net score nor a correct-count column was found; results may be incomplete";
    pub const STUDENT_NUMBER_MISSING: &str = "student number missing";
}

// =============================================================================
// Format Classification
// =============================================================================

/// Number of leading lines sampled by the format classifier
pub const CLASSIFIER_SAMPLE_LINES: usize = 20;

/// Minimum length of an answer-mark run for a line to look like raw optical data
pub const OPTICAL_MIN_MARK_RUN: usize = 20;

/// Default minimum classifier confidence required before parsing a report
pub const DEFAULT_MIN_REPORT_CONFIDENCE: f64 = 0.5;

// =============================================================================
// Text Decoding
// =============================================================================

/// Default single-byte code page used when input is not valid UTF-8
pub const DEFAULT_FALLBACK_ENCODING: &str = "windows-1254";

/// Character sequences produced when UTF-8 Turkish text is decoded as Latin-1
pub const MOJIBAKE_MARKERS: &[&str] = &[
    "Ã§", "Ã‡", "Ã¶", "Ã–", "Ã¼", "Ãœ", "Ä±", "Ä°", "ÄŸ", "Äž", "ÅŸ", "Åž",
];

// =============================================================================
// CLI Defaults
// =============================================================================

/// File extensions picked up when a directory is given as input
pub const REPORT_FILE_EXTENSIONS: &[&str] = &["txt", "csv", "tsv", "dat"];

/// Upper bound for the worker count
pub const MAX_WORKERS: usize = 64;

/// Default number of concurrent file workers
pub fn default_workers() -> usize {
    num_cpus::get().clamp(1, MAX_WORKERS)
}
