use regex::Regex;

use crate::models::{Category, Transaction};

/// "Categorize similar" rule: text pattern that maps to a category.
#[derive(Debug, Clone)]
pub(crate) struct CategoryRule {
    pub(crate) pattern: String,
    pub(crate) category: Category,
    pub(crate) is_regex: bool,
    /// Only match when the pattern is not glued to other letters.
    pub(crate) whole_word: bool,
}

impl CategoryRule {
    pub(crate) fn contains(pattern: &str, category: Category) -> Self {
        Self {
            pattern: pattern.to_string(),
            category,
            is_regex: false,
            whole_word: false,
        }
    }

    /// Case-insensitive match on a standalone word, so "ola" hits "OLA CABS"
    /// and "UPI-OLA-991" but not "Granola" or "Coca-Cola".
    pub(crate) fn word(pattern: &str, category: Category) -> Self {
        Self {
            whole_word: true,
            ..Self::contains(pattern, category)
        }
    }

    pub(crate) fn regex(pattern: &str, category: Category) -> Self {
        Self {
            pattern: pattern.to_string(),
            category,
            is_regex: true,
            whole_word: false,
        }
    }
}

/// Built-in rules for merchants that show up on most student statements.
pub(crate) fn default_rules() -> Vec<CategoryRule> {
    vec![
        CategoryRule::contains("zomato", Category::Food),
        CategoryRule::contains("swiggy", Category::Food),
        CategoryRule::contains("canteen", Category::Food),
        CategoryRule::word("uber", Category::Transport),
        CategoryRule::word("ola", Category::Transport),
        CategoryRule::word("metro", Category::Transport),
        CategoryRule::contains("rapido", Category::Transport),
        CategoryRule::contains("hostel", Category::Rent),
        CategoryRule::contains("pg rent", Category::Rent),
        CategoryRule::contains("udemy", Category::Education),
        CategoryRule::contains("coursera", Category::Education),
        CategoryRule::contains("netflix", Category::Entertainment),
        CategoryRule::contains("spotify", Category::Entertainment),
        CategoryRule::contains("bookmyshow", Category::Entertainment),
        CategoryRule::contains("recharge", Category::Bills),
        CategoryRule::contains("electricity", Category::Bills),
        CategoryRule::contains("amazon", Category::Shopping),
        CategoryRule::contains("flipkart", Category::Shopping),
        CategoryRule::contains("myntra", Category::Shopping),
        CategoryRule::contains("pharmacy", Category::Health),
        CategoryRule::word("apollo", Category::Health),
    ]
}

pub(crate) struct Categorizer {
    rules: Vec<CompiledRule>,
}

struct CompiledRule {
    matcher: Matcher,
    category: Category,
}

enum Matcher {
    Contains(String),
    Word(String),
    Regex(Regex),
}

impl Matcher {
    /// `lower` is `text` lowercased; plain patterns are stored lowercased.
    fn is_match(&self, text: &str, lower: &str) -> bool {
        match self {
            Matcher::Contains(pattern) => lower.contains(pattern.as_str()),
            Matcher::Word(pattern) => contains_word(lower, pattern),
            Matcher::Regex(re) => re.is_match(text),
        }
    }
}

/// True when `word` occurs in `haystack` with no ASCII letter directly
/// before or after it. Digits and punctuation count as separators.
fn contains_word(haystack: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    let is_letter = |c: Option<char>| c.is_some_and(|c| c.is_ascii_alphabetic());
    haystack.match_indices(word).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + word.len()..].chars().next();
        !is_letter(before) && !is_letter(after)
    })
}

impl Categorizer {
    /// Compile `rules` in order. Regex rules that fail to compile are skipped
    /// and their patterns returned alongside the categorizer.
    pub(crate) fn new(rules: &[CategoryRule]) -> (Self, Vec<String>) {
        let mut bad_patterns = Vec::new();
        let mut compiled = Vec::with_capacity(rules.len());

        for rule in rules {
            let matcher = if rule.is_regex {
                match Regex::new(&rule.pattern) {
                    Ok(re) => Matcher::Regex(re),
                    Err(e) => {
                        log::warn!("skipping invalid rule '{}': {e}", rule.pattern);
                        bad_patterns.push(rule.pattern.clone());
                        continue;
                    }
                }
            } else if rule.whole_word {
                Matcher::Word(rule.pattern.to_lowercase())
            } else {
                Matcher::Contains(rule.pattern.to_lowercase())
            };
            compiled.push(CompiledRule {
                matcher,
                category: rule.category.clone(),
            });
        }

        (Self { rules: compiled }, bad_patterns)
    }

    pub(crate) fn categorize(&self, text: &str) -> Option<&Category> {
        let lower = text.to_lowercase();

        self.rules
            .iter()
            .find(|rule| rule.matcher.is_match(text, &lower))
            .map(|rule| &rule.category)
    }

    /// Match against the merchant first, then the description.
    pub(crate) fn categorize_transaction(&self, txn: &Transaction) -> Option<&Category> {
        txn.merchant
            .as_deref()
            .and_then(|m| self.categorize(m))
            .or_else(|| self.categorize(&txn.description))
    }

    /// Proposed categories for every uncategorized record a rule matches, as
    /// `(transaction id, category)`. Records are left untouched.
    pub(crate) fn suggest_batch(&self, transactions: &[Transaction]) -> Vec<(i64, Category)> {
        transactions
            .iter()
            .filter(|t| t.category.is_uncategorized())
            .filter_map(|t| self.categorize_transaction(t).map(|c| (t.id, c.clone())))
            .collect()
    }
}

/// Suggest a contains-pattern for a description, e.g. "SWIGGY*ORDER 4471" →
/// "swiggy order".
pub(crate) fn suggest_rule(description: &str) -> String {
    let cleaned = description
        .to_uppercase()
        .replace(|c: char| c.is_ascii_digit(), "")
        .replace('#', "")
        .replace('*', " ")
        .trim()
        .to_string();

    let words: Vec<&str> = cleaned.split_whitespace().collect();
    let pattern = match words.as_slice() {
        [first, second, ..] => format!("{first} {second}"),
        [only] => only.to_string(),
        [] => description.to_string(),
    };

    pattern.to_lowercase()
}
