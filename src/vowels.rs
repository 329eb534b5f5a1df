//! Reference vowel targets
//!
//! Approximate adult F1/F2 targets for the monophthongs of several
//! languages. The analysis pipeline never consults these tables; they are a
//! convenience for callers that need something to score against.

use serde::{Deserialize, Serialize};

/// Target formant values for one vowel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VowelTarget {
    /// IPA symbol, e.g. `/i/`
    pub ipa: String,
    /// Example word
    pub example: String,
    /// Target F1 in Hz
    pub f1: f64,
    /// Target F2 in Hz
    pub f2: f64,
}

impl VowelTarget {
    pub fn new(ipa: impl Into<String>, example: impl Into<String>, f1: f64, f2: f64) -> Self {
        Self {
            ipa: ipa.into(),
            example: example.into(),
            f1,
            f2,
        }
    }
}

/// Languages with a built-in vowel table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    AmericanEnglish,
    Spanish,
    French,
    German,
    Italian,
    BrazilianPortuguese,
    Turkish,
    Arabic,
    Russian,
    Mandarin,
}

type Row = (&'static str, &'static str, f64, f64);

const AMERICAN_ENGLISH: &[Row] = &[
    ("/i/", "as in 'bEEt'", 280.0, 2250.0),
    ("/ɪ/", "as in 'bIt'", 400.0, 2000.0),
    ("/ɛ/", "as in 'bEt'", 550.0, 1800.0),
    ("/æ/", "as in 'bAt'", 700.0, 1700.0),
    ("/ɑ/", "as in 'fAther'", 750.0, 1100.0),
    ("/ɔ/", "as in 'cAUght'", 600.0, 900.0),
    ("/u/", "as in 'bOOt'", 300.0, 870.0),
    ("/ʊ/", "as in 'bOOk'", 400.0, 1000.0),
    ("/ʌ/", "as in 'bUt'", 650.0, 1200.0),
    ("/ə/", "as in 'About'", 500.0, 1500.0),
];

const SPANISH: &[Row] = &[
    ("/i/", "sí, mi (yes, my)", 240.0, 2400.0),
    ("/e/", "té, de (tea, of)", 450.0, 2300.0),
    ("/a/", "la, casa (the, house)", 700.0, 1200.0),
    ("/o/", "no, sol (no, sun)", 450.0, 800.0),
    ("/u/", "tú, luz (you, light)", 300.0, 700.0),
];

const FRENCH: &[Row] = &[
    ("/i/", "si, vie (if, life)", 250.0, 2300.0),
    ("/e/", "été (summer)", 400.0, 2100.0),
    ("/ɛ/", "mère (mother)", 550.0, 1800.0),
    ("/a/", "chat (cat)", 700.0, 1300.0),
    ("/ɔ/", "port (port)", 550.0, 900.0),
    ("/o/", "beau (beautiful)", 400.0, 850.0),
    ("/u/", "tout (all)", 300.0, 800.0),
    ("/y/", "tu (you)", 250.0, 2000.0),
    ("/ø/", "feu (fire)", 400.0, 1500.0),
    ("/œ/", "peur (fear)", 550.0, 1400.0),
];

const GERMAN: &[Row] = &[
    ("/i/", "Biene (bee)", 250.0, 2300.0),
    ("/ɪ/", "bitte (please)", 400.0, 2000.0),
    ("/e/", "Tee (tea)", 450.0, 2200.0),
    ("/ɛ/", "Bett (bed)", 550.0, 1750.0),
    ("/a/", "Hand (hand)", 700.0, 1300.0),
    ("/ɔ/", "Gott (god)", 550.0, 900.0),
    ("/o/", "Boot (boat)", 400.0, 850.0),
    ("/ʊ/", "Mutter (mother)", 400.0, 1050.0),
    ("/u/", "Schuh (shoe)", 300.0, 800.0),
    ("/y/", "über (over)", 250.0, 1850.0),
    ("/ø/", "schön (beautiful)", 450.0, 1500.0),
];

const ITALIAN: &[Row] = &[
    ("/i/", "vino (wine)", 240.0, 2400.0),
    ("/e/", "mese (month)", 450.0, 2100.0),
    ("/ɛ/", "bello (beautiful)", 550.0, 1800.0),
    ("/a/", "casa (house)", 700.0, 1250.0),
    ("/ɔ/", "cosa (thing)", 550.0, 900.0),
    ("/o/", "nome (name)", 450.0, 850.0),
    ("/u/", "nudo (naked)", 300.0, 750.0),
];

const BRAZILIAN_PORTUGUESE: &[Row] = &[
    ("/i/", "vi (I saw)", 250.0, 2350.0),
    ("/e/", "vê (sees)", 450.0, 2150.0),
    ("/ɛ/", "pé (foot)", 550.0, 1850.0),
    ("/a/", "má (bad)", 700.0, 1300.0),
    ("/ɔ/", "pó (dust)", 550.0, 950.0),
    ("/o/", "vô (grandpa)", 450.0, 900.0),
    ("/u/", "nu (naked)", 300.0, 800.0),
];

const TURKISH: &[Row] = &[
    ("/i/", "ip (thread)", 240.0, 2400.0),
    ("/y/", "gül (rose)", 240.0, 2100.0),
    ("/ɯ/", "kız (girl)", 300.0, 1400.0),
    ("/u/", "kum (sand)", 250.0, 700.0),
    ("/e/", "el (hand)", 500.0, 2300.0),
    ("/ø/", "göl (lake)", 500.0, 1600.0),
    ("/a/", "at (horse)", 700.0, 1200.0),
    ("/o/", "kol (arm)", 450.0, 800.0),
];

const ARABIC: &[Row] = &[
    ("/i/", "بيت (house)", 270.0, 2300.0),
    ("/a/", "باب (door)", 750.0, 1200.0),
    ("/u/", "سوق (market)", 320.0, 850.0),
];

const RUSSIAN: &[Row] = &[
    ("/i/", "мир (world)", 250.0, 2300.0),
    ("/ɨ/", "мыло (soap)", 350.0, 1600.0),
    ("/e/", "это (this)", 500.0, 2000.0),
    ("/a/", "мама (mom)", 700.0, 1200.0),
    ("/o/", "дом (house)", 500.0, 900.0),
    ("/u/", "ум (mind)", 300.0, 800.0),
];

const MANDARIN: &[Row] = &[
    ("/i/", "一 yī (one)", 250.0, 2400.0),
    ("/y/", "鱼 yú (fish)", 250.0, 1900.0),
    ("/ɯ/", "四 sì (four)", 300.0, 1400.0),
    ("/u/", "五 wǔ (five)", 300.0, 850.0),
    ("/ɤ/", "饿 è (hungry)", 450.0, 1200.0),
    ("/o/", "波 bō (wave)", 450.0, 900.0),
    ("/a/", "八 bā (eight)", 700.0, 1250.0),
];

impl Language {
    /// Every language with a built-in table
    pub const ALL: [Language; 10] = [
        Language::AmericanEnglish,
        Language::Spanish,
        Language::French,
        Language::German,
        Language::Italian,
        Language::BrazilianPortuguese,
        Language::Turkish,
        Language::Arabic,
        Language::Russian,
        Language::Mandarin,
    ];

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Language::AmericanEnglish => "English (American)",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
            Language::Italian => "Italian",
            Language::BrazilianPortuguese => "Portuguese (Brazilian)",
            Language::Turkish => "Turkish",
            Language::Arabic => "Arabic (Modern Standard)",
            Language::Russian => "Russian",
            Language::Mandarin => "Mandarin Chinese",
        }
    }

    fn rows(self) -> &'static [Row] {
        match self {
            Language::AmericanEnglish => AMERICAN_ENGLISH,
            Language::Spanish => SPANISH,
            Language::French => FRENCH,
            Language::German => GERMAN,
            Language::Italian => ITALIAN,
            Language::BrazilianPortuguese => BRAZILIAN_PORTUGUESE,
            Language::Turkish => TURKISH,
            Language::Arabic => ARABIC,
            Language::Russian => RUSSIAN,
            Language::Mandarin => MANDARIN,
        }
    }

    /// Vowel targets of this language, in table order
    pub fn vowels(self) -> Vec<VowelTarget> {
        self.rows()
            .iter()
            .map(|&(ipa, example, f1, f2)| VowelTarget::new(ipa, example, f1, f2))
            .collect()
    }

    /// Look up a vowel by IPA symbol (with or without slashes)
    pub fn vowel(self, ipa: &str) -> Option<VowelTarget> {
        let wanted = ipa.trim_matches('/');
        self.rows()
            .iter()
            .find(|(symbol, ..)| symbol.trim_matches('/') == wanted)
            .map(|&(ipa, example, f1, f2)| VowelTarget::new(ipa, example, f1, f2))
    }
}
