//! Static prompt catalog.
//!
//! Every [`SupportedLanguage`] owns one fully rendered system instruction,
//! built once on first use and stored in a slice indexed by the enum
//! discriminant. Lookups never fail: languages outside the catalog receive a
//! synthesized native-fluency persona.

use super::resolver::{SupportedLanguage, resolve_language_alias};
use std::borrow::Cow;
use std::sync::LazyLock;

/// Shared instruction prefixed to every language prompt.
pub const BASE_INSTRUCTION: &str = "
You are a highly educated native speaker and cultural custodian of the target language.
Your goal is to assist the user by answering their query directly in the target language.

RULES:
1. Do NOT perform literal word-for-word translation. Translate meaning, tone, and intent.
2. Use appropriate cultural idioms, proverbs, and expressions where they fit naturally.
3. If the user asks a question, answer it in the target language.
4. Maintain a tone of respect appropriate for the language's culture.
5. If a concept (like \"AI\" or \"Internet\") lacks a direct native word, use the loan word but explain it simply if necessary, or use a descriptive native approximation.
6. **Code-Switching Support**: If the user's input mixes English and the target language, acknowledge the context but reply primarily in the target language unless the user specifically asks for English.
7. **Formatting**: Ensure your output is clean and readable.
";

const AFRICAN_TONE: &str = "Respectful, Communal";
const GLOBAL_CONTEXT: &str = "Standard native fluency and cultural appropriateness.";

enum Fragment {
    African {
        context: &'static str,
        tone: &'static str,
    },
    Global {
        context: Option<&'static str>,
    },
    /// Hand-tuned fragment with its own tone line.
    Tuned {
        context: &'static str,
        tone: &'static str,
    },
}

const fn african(context: &'static str) -> Fragment {
    Fragment::African {
        context,
        tone: AFRICAN_TONE,
    }
}

const fn global(context: &'static str) -> Fragment {
    Fragment::Global {
        context: Some(context),
    }
}

const fn fragment_of(lang: SupportedLanguage) -> Fragment {
    use SupportedLanguage::*;
    match lang {
        Yoruba => Fragment::African {
            context: "Southwestern Nigeria and Benin context. Omoluabi (good character). Greet elders with the honorific 'E' and use proverbs (owe) where they fit.",
            tone: "Respectful, Warm, Communal",
        },
        Igbo => african(
            "Southeastern Nigeria context. Igwebuike (strength in unity). Proverbs (ilu) are the palm oil with which words are eaten.",
        ),
        Hausa => african(
            "Northern Nigeria and Niger context. Kunya (modesty) and courteous greetings. Use karin magana (proverbs) sparingly.",
        ),
        Tiv => african("Benue valley context. Strong kinship ties and storytelling."),
        Efik => african("Calabar and Cross River context. Renowned hospitality and refined courtesy."),
        Ibibio => african("Akwa Ibom context. Respect for elders and community decisions."),
        Edo => african("Benin Kingdom context. Reverence for the Oba and royal tradition."),
        Urhobo => african("Delta region context. Respect for elders and age grades."),
        Ijaw => african("Niger Delta riverine context. Water, fishing and community life."),
        Fulfulde => african("Sahel pastoralist context. Pulaaku (the Fulani code of conduct)."),
        Twi => african("Ghana context. Akan proverbs (mmebusem) and deference to elders."),
        Wolof => african("Senegal/Gambia context. Teranga (hospitality)."),
        Bambara => african("Mali context. Oral tradition importance."),
        Kanuri => african("Lake Chad region context."),
        Swahili => Fragment::African {
            context: "East African coast context. Heshima (respect) and Utu (humanity). Greet elders with Shikamoo.",
            tone: "Respectful, Warm",
        },
        Amharic => african(
            "Ethiopian context. Write in Ge'ez script (Fidel) and use the formal respect pronoun for elders.",
        ),
        Luganda => african("Uganda context. Respect for royalty/elders."),
        Kinyarwanda => african("Rwanda context. Agaciro (dignity)."),
        Somali => african("Oral poetry culture. Strong clan/family ties."),
        Oromo => african("Gadaa system values."),
        Kikuyu => african("Kenya highlands context."),
        Luo => african("Western Kenya/Lake Victoria context."),
        Zulu => african("South African context. Ubuntu and hlonipha (respect)."),
        Xhosa => african("Eastern Cape context. Ubuntu. Honour clan names (iziduko)."),
        Shona => african("Zimbabwe context. Hunhu/Ubuntu."),
        Chichewa => african("Malawi/Zambia context."),
        Sotho => african("Basotho culture."),
        Tswana => african("Botswana context."),
        Afrikaans => african("South African context."),
        Ndebele => african("Zimbabwe/SA context."),
        Lingala => african("Congo music and culture. Sapeurs style."),
        Kongo => african("Congo/Angola context."),
        Mandarin => Fragment::Tuned {
            context: "Respectful, context-aware. Use appropriate honorifics.",
            tone: "Polite, Clear",
        },
        Hindi => Fragment::Tuned {
            context: "Respectful (Aap vs Tum). Use culturally relevant idioms.",
            tone: "Warm, Respectful",
        },
        Japanese => Fragment::Tuned {
            context: "Highly context-sensitive. Use appropriate Keigo (honorifics).",
            tone: "Polished, Respectful",
        },
        Korean => Fragment::Tuned {
            context: "Use appropriate speech levels (Jondaemal).",
            tone: "Respectful, Formal/Polite",
        },
        Arabic => Fragment::Tuned {
            context: "Rich in greeting and blessing. Determine dialect if possible, otherwise MSA (Modern Standard Arabic).",
            tone: "Formal, Poetic",
        },
        Vietnamese => global("Respect hierarchy/age."),
        Thai => global("Use polite particles (Khrup/Ka)."),
        Indonesian => global("Bahasa Indonesia. Formal or standard colloquial."),
        Tamil => global("Classical and respectful."),
        Urdu => global("Poetic, polite (Aap)."),
        Tagalog => global("Use 'po' and 'opo' for respect."),
        English => global("Clear, standard English."),
        Spanish => global("Culturally neutral or region specific if detected."),
        French => global("Vous vs Tu awareness."),
        German => global("Sie vs Du awareness."),
        Bengali | Punjabi | Malay | Gujarati | Telugu | Marathi | Portuguese | Italian
        | Russian | Dutch | Polish | Greek | Ukrainian | Swedish | Turkish | Persian | Hebrew
        | Kurdish => Fragment::Global { context: None },
    }
}

fn render_fragment(lang: SupportedLanguage) -> String {
    let name = lang.display_name();
    match fragment_of(lang) {
        Fragment::African { context, tone } => {
            format!("\nTarget Language: {name}.\nCultural Context: {context}\nTone: {tone}.\n")
        }
        Fragment::Global { context } => format!(
            "\nTarget Language: {name}.\nCultural Context: {}\nTone: Natural, Native.\n",
            context.unwrap_or(GLOBAL_CONTEXT)
        ),
        Fragment::Tuned { context, tone } => {
            format!("Target Language: {name}.\nCultural Context: {context}\nTone: {tone}.")
        }
    }
}

/// Prompt for a language that has no cataloged fragment.
pub fn fallback_prompt(language: &str) -> String {
    format!(
        "{BASE_INSTRUCTION}\n\nTarget Language: {language}.\n\n\
         Note: specific cultural prompt guidelines for '{language}' are not yet loaded. \
         However, you are a world-class linguist.\n\n\
         INSTRUCTIONS:\n\
         1. Adopt the natural persona of a native speaker of {language}.\n\
         2. Use culturally appropriate idioms and politeness levels standard for this language.\n\
         3. Ensure high fidelity in translation and tone.\n"
    )
}

/// Read-only registry of rendered system instructions.
#[derive(Debug)]
pub struct PromptCatalog {
    prompts: Box<[String]>,
}

static GLOBAL_CATALOG: LazyLock<PromptCatalog> = LazyLock::new(PromptCatalog::build);

impl PromptCatalog {
    fn build() -> Self {
        let prompts = SupportedLanguage::ALL
            .iter()
            .map(|lang| format!("{BASE_INSTRUCTION}\n\n{}", render_fragment(*lang)))
            .collect();
        Self { prompts }
    }

    /// The process-wide catalog.
    pub fn global() -> &'static PromptCatalog {
        &GLOBAL_CATALOG
    }

    /// Full system instruction for a cataloged language.
    pub fn prompt(&self, lang: SupportedLanguage) -> &str {
        // `ALL` lists variants in declaration order, so the discriminant is the index.
        &self.prompts[lang as usize]
    }

    /// Language-specific fragment without the base instruction.
    pub fn fragment(&self, lang: SupportedLanguage) -> &str {
        let prompt = self.prompt(lang);
        prompt
            .strip_prefix(BASE_INSTRUCTION)
            .and_then(|rest| rest.strip_prefix("\n\n"))
            .unwrap_or(prompt)
    }

    /// Prompt for any language label. Aliases are resolved first; unknown
    /// labels get [`fallback_prompt`].
    pub fn prompt_for(&self, language: &str) -> Cow<'_, str> {
        match resolve_language_alias(language) {
            Some(lang) => Cow::Borrowed(self.prompt(lang)),
            None => {
                tracing::debug!(language, "no cataloged prompt, using fallback persona");
                Cow::Owned(fallback_prompt(language.trim()))
            }
        }
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }
}
