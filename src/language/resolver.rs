//! Canonical language identifiers and alias resolution.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Broad grouping used to pick the prompt template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    WestAfrica,
    EastAfrica,
    SouthernAfrica,
    CentralAfrica,
    Asia,
    EuropeAmericas,
    MiddleEast,
}

impl Region {
    pub const fn is_african(self) -> bool {
        matches!(
            self,
            Region::WestAfrica | Region::EastAfrica | Region::SouthernAfrica | Region::CentralAfrica
        )
    }
}

macro_rules! supported_languages {
    ($($variant:ident => $id:literal, $display:literal, $region:ident;)+) => {
        /// Languages with a cataloged cultural prompt.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum SupportedLanguage {
            $($variant,)+
        }

        impl SupportedLanguage {
            pub const ALL: &'static [SupportedLanguage] = &[$(SupportedLanguage::$variant,)+];

            /// Canonical lowercase identifier (e.g. `yoruba`).
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(SupportedLanguage::$variant => $id,)+
                }
            }

            /// Name used inside prompts (e.g. `Mandarin Chinese`).
            pub const fn display_name(self) -> &'static str {
                match self {
                    $(SupportedLanguage::$variant => $display,)+
                }
            }

            pub const fn region(self) -> Region {
                match self {
                    $(SupportedLanguage::$variant => Region::$region,)+
                }
            }
        }
    };
}

supported_languages! {
    Yoruba => "yoruba", "Yoruba", WestAfrica;
    Igbo => "igbo", "Igbo", WestAfrica;
    Hausa => "hausa", "Hausa", WestAfrica;
    Tiv => "tiv", "Tiv", WestAfrica;
    Efik => "efik", "Efik", WestAfrica;
    Ibibio => "ibibio", "Ibibio", WestAfrica;
    Edo => "edo", "Edo", WestAfrica;
    Urhobo => "urhobo", "Urhobo", WestAfrica;
    Ijaw => "ijaw", "Ijaw", WestAfrica;
    Fulfulde => "fulfulde", "Fulfulde", WestAfrica;
    Twi => "twi", "Twi", WestAfrica;
    Wolof => "wolof", "Wolof", WestAfrica;
    Bambara => "bambara", "Bambara", WestAfrica;
    Kanuri => "kanuri", "Kanuri", WestAfrica;
    Swahili => "swahili", "Swahili", EastAfrica;
    Amharic => "amharic", "Amharic", EastAfrica;
    Luganda => "luganda", "Luganda", EastAfrica;
    Kinyarwanda => "kinyarwanda", "Kinyarwanda", EastAfrica;
    Somali => "somali", "Somali", EastAfrica;
    Oromo => "oromo", "Oromo", EastAfrica;
    Kikuyu => "kikuyu", "Kikuyu", EastAfrica;
    Luo => "luo", "Luo", EastAfrica;
    Zulu => "zulu", "Zulu", SouthernAfrica;
    Xhosa => "xhosa", "Xhosa", SouthernAfrica;
    Shona => "shona", "Shona", SouthernAfrica;
    Chichewa => "chichewa", "Chichewa", SouthernAfrica;
    Sotho => "sotho", "Sesotho", SouthernAfrica;
    Tswana => "tswana", "Setswana", SouthernAfrica;
    Afrikaans => "afrikaans", "Afrikaans", SouthernAfrica;
    Ndebele => "ndebele", "Ndebele", SouthernAfrica;
    Lingala => "lingala", "Lingala", CentralAfrica;
    Kongo => "kongo", "Kikongo", CentralAfrica;
    Mandarin => "mandarin", "Mandarin Chinese", Asia;
    Hindi => "hindi", "Hindi", Asia;
    Japanese => "japanese", "Japanese", Asia;
    Korean => "korean", "Korean", Asia;
    Vietnamese => "vietnamese", "Vietnamese", Asia;
    Thai => "thai", "Thai", Asia;
    Indonesian => "indonesian", "Indonesian", Asia;
    Bengali => "bengali", "Bengali", Asia;
    Punjabi => "punjabi", "Punjabi", Asia;
    Tamil => "tamil", "Tamil", Asia;
    Urdu => "urdu", "Urdu", Asia;
    Malay => "malay", "Malay", Asia;
    Tagalog => "tagalog", "Tagalog/Filipino", Asia;
    Gujarati => "gujarati", "Gujarati", Asia;
    Telugu => "telugu", "Telugu", Asia;
    Marathi => "marathi", "Marathi", Asia;
    English => "english", "English", EuropeAmericas;
    Spanish => "spanish", "Spanish", EuropeAmericas;
    French => "french", "French", EuropeAmericas;
    German => "german", "German", EuropeAmericas;
    Portuguese => "portuguese", "Portuguese", EuropeAmericas;
    Italian => "italian", "Italian", EuropeAmericas;
    Russian => "russian", "Russian", EuropeAmericas;
    Dutch => "dutch", "Dutch", EuropeAmericas;
    Polish => "polish", "Polish", EuropeAmericas;
    Greek => "greek", "Greek", EuropeAmericas;
    Ukrainian => "ukrainian", "Ukrainian", EuropeAmericas;
    Swedish => "swedish", "Swedish", EuropeAmericas;
    Turkish => "turkish", "Turkish", EuropeAmericas;
    Arabic => "arabic", "Arabic", MiddleEast;
    Persian => "persian", "Persian (Farsi)", MiddleEast;
    Hebrew => "hebrew", "Hebrew", MiddleEast;
    Kurdish => "kurdish", "Kurdish", MiddleEast;
}

impl fmt::Display for SupportedLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SupportedLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve_language_alias(s).ok_or_else(|| format!("unsupported language: {s}"))
    }
}

/// Endonyms, regional names, ISO 639-1 codes and common misspellings.
const LANGUAGE_ALIASES: &[(&str, SupportedLanguage)] = &[
    // African variants
    ("kiswahili", SupportedLanguage::Swahili),
    ("isizulu", SupportedLanguage::Zulu),
    ("isixhosa", SupportedLanguage::Xhosa),
    ("akan", SupportedLanguage::Twi),
    ("fante", SupportedLanguage::Twi),
    ("asante", SupportedLanguage::Twi),
    ("sesotho", SupportedLanguage::Sotho),
    ("setswana", SupportedLanguage::Tswana),
    ("kikongo", SupportedLanguage::Kongo),
    ("bini", SupportedLanguage::Edo),
    ("fulani", SupportedLanguage::Fulfulde),
    ("fula", SupportedLanguage::Fulfulde),
    ("peul", SupportedLanguage::Fulfulde),
    ("pulaar", SupportedLanguage::Fulfulde),
    ("yorùbá", SupportedLanguage::Yoruba),
    ("èdè yorùbá", SupportedLanguage::Yoruba),
    ("yorouba", SupportedLanguage::Yoruba),
    ("yourba", SupportedLanguage::Yoruba),
    ("asụsụ igbo", SupportedLanguage::Igbo),
    ("ibo", SupportedLanguage::Igbo),
    ("harshen hausa", SupportedLanguage::Hausa),
    ("izon", SupportedLanguage::Ijaw),
    ("ijo", SupportedLanguage::Ijaw),
    ("swahilli", SupportedLanguage::Swahili),
    ("amarigna", SupportedLanguage::Amharic),
    ("amarinya", SupportedLanguage::Amharic),
    ("አማርኛ", SupportedLanguage::Amharic),
    ("ganda", SupportedLanguage::Luganda),
    ("af-soomaali", SupportedLanguage::Somali),
    ("afaan oromoo", SupportedLanguage::Oromo),
    ("gikuyu", SupportedLanguage::Kikuyu),
    ("dholuo", SupportedLanguage::Luo),
    ("chishona", SupportedLanguage::Shona),
    ("nyanja", SupportedLanguage::Chichewa),
    ("chinyanja", SupportedLanguage::Chichewa),
    ("isindebele", SupportedLanguage::Ndebele),
    ("kinyarwanda-kirundi", SupportedLanguage::Kinyarwanda),
    // Asian and global variants
    ("chinese", SupportedLanguage::Mandarin),
    ("mandarin chinese", SupportedLanguage::Mandarin),
    ("putonghua", SupportedLanguage::Mandarin),
    ("普通话", SupportedLanguage::Mandarin),
    ("中文", SupportedLanguage::Mandarin),
    ("farsi", SupportedLanguage::Persian),
    ("فارسی", SupportedLanguage::Persian),
    ("filipino", SupportedLanguage::Tagalog),
    ("pilipino", SupportedLanguage::Tagalog),
    ("bahasa", SupportedLanguage::Indonesian),
    ("bahasa indonesia", SupportedLanguage::Indonesian),
    ("bahasa melayu", SupportedLanguage::Malay),
    ("bangla", SupportedLanguage::Bengali),
    ("panjabi", SupportedLanguage::Punjabi),
    ("nihongo", SupportedLanguage::Japanese),
    ("日本語", SupportedLanguage::Japanese),
    ("한국어", SupportedLanguage::Korean),
    ("हिन्दी", SupportedLanguage::Hindi),
    ("español", SupportedLanguage::Spanish),
    ("castellano", SupportedLanguage::Spanish),
    ("français", SupportedLanguage::French),
    ("deutsch", SupportedLanguage::German),
    ("português", SupportedLanguage::Portuguese),
    ("italiano", SupportedLanguage::Italian),
    ("русский", SupportedLanguage::Russian),
    ("nederlands", SupportedLanguage::Dutch),
    ("polski", SupportedLanguage::Polish),
    ("svenska", SupportedLanguage::Swedish),
    ("türkçe", SupportedLanguage::Turkish),
    ("العربية", SupportedLanguage::Arabic),
    ("עברית", SupportedLanguage::Hebrew),
    ("kurdî", SupportedLanguage::Kurdish),
    // ISO 639-1
    ("yo", SupportedLanguage::Yoruba),
    ("ig", SupportedLanguage::Igbo),
    ("ha", SupportedLanguage::Hausa),
    ("ff", SupportedLanguage::Fulfulde),
    ("tw", SupportedLanguage::Twi),
    ("ak", SupportedLanguage::Twi),
    ("wo", SupportedLanguage::Wolof),
    ("bm", SupportedLanguage::Bambara),
    ("kr", SupportedLanguage::Kanuri),
    ("sw", SupportedLanguage::Swahili),
    ("am", SupportedLanguage::Amharic),
    ("lg", SupportedLanguage::Luganda),
    ("rw", SupportedLanguage::Kinyarwanda),
    ("so", SupportedLanguage::Somali),
    ("om", SupportedLanguage::Oromo),
    ("ki", SupportedLanguage::Kikuyu),
    ("zu", SupportedLanguage::Zulu),
    ("xh", SupportedLanguage::Xhosa),
    ("sn", SupportedLanguage::Shona),
    ("ny", SupportedLanguage::Chichewa),
    ("st", SupportedLanguage::Sotho),
    ("tn", SupportedLanguage::Tswana),
    ("af", SupportedLanguage::Afrikaans),
    ("nd", SupportedLanguage::Ndebele),
    ("ln", SupportedLanguage::Lingala),
    ("kg", SupportedLanguage::Kongo),
    ("zh", SupportedLanguage::Mandarin),
    ("hi", SupportedLanguage::Hindi),
    ("ja", SupportedLanguage::Japanese),
    ("ko", SupportedLanguage::Korean),
    ("vi", SupportedLanguage::Vietnamese),
    ("th", SupportedLanguage::Thai),
    ("id", SupportedLanguage::Indonesian),
    ("bn", SupportedLanguage::Bengali),
    ("pa", SupportedLanguage::Punjabi),
    ("ta", SupportedLanguage::Tamil),
    ("ur", SupportedLanguage::Urdu),
    ("ms", SupportedLanguage::Malay),
    ("tl", SupportedLanguage::Tagalog),
    ("gu", SupportedLanguage::Gujarati),
    ("te", SupportedLanguage::Telugu),
    ("mr", SupportedLanguage::Marathi),
    ("en", SupportedLanguage::English),
    ("es", SupportedLanguage::Spanish),
    ("fr", SupportedLanguage::French),
    ("de", SupportedLanguage::German),
    ("pt", SupportedLanguage::Portuguese),
    ("it", SupportedLanguage::Italian),
    ("ru", SupportedLanguage::Russian),
    ("nl", SupportedLanguage::Dutch),
    ("pl", SupportedLanguage::Polish),
    ("el", SupportedLanguage::Greek),
    ("uk", SupportedLanguage::Ukrainian),
    ("sv", SupportedLanguage::Swedish),
    ("tr", SupportedLanguage::Turkish),
    ("ar", SupportedLanguage::Arabic),
    ("fa", SupportedLanguage::Persian),
    ("he", SupportedLanguage::Hebrew),
    ("ku", SupportedLanguage::Kurdish),
];

static LOOKUP: LazyLock<HashMap<&'static str, SupportedLanguage>> = LazyLock::new(|| {
    let mut map = HashMap::with_capacity(SupportedLanguage::ALL.len() + LANGUAGE_ALIASES.len());
    map.extend(LANGUAGE_ALIASES.iter().copied());
    // Canonical ids always win over an alias with the same spelling.
    map.extend(SupportedLanguage::ALL.iter().map(|lang| (lang.as_str(), *lang)));
    map
});

/// Resolve a free-form language name to its canonical identifier.
///
/// Input is trimmed and case-folded. Returns `None` when nothing matches;
/// callers decide the fallback.
pub fn resolve_language_alias(input: &str) -> Option<SupportedLanguage> {
    let normalized = input.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }
    LOOKUP.get(normalized.as_str()).copied()
}

/// Canonical id for `input`, or the trimmed raw label when no match exists.
pub fn canonicalize(input: &str) -> String {
    resolve_language_alias(input)
        .map(|lang| lang.as_str().to_string())
        .unwrap_or_else(|| input.trim().to_string())
}

/// Alias entries, for diagnostics and tests.
pub fn aliases() -> impl Iterator<Item = (&'static str, SupportedLanguage)> {
    LANGUAGE_ALIASES.iter().copied()
}
