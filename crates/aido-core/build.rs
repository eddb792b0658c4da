//! Rejects malformed embedded resources before they reach an `expect` at
//! runtime (`Settings::default`, `default_preprompts`, `WordDictionary::builtin`).

const SETTINGS: &str = "src/default_settings.toml";
const PREPROMPTS: &str = "src/trigger/default_preprompts.toml";
const WORDS: &str = "src/dict/default_words.tsv";

fn main() {
    for path in [SETTINGS, PREPROMPTS, WORDS] {
        println!("cargo:rerun-if-changed={path}");
    }

    check_toml(SETTINGS, include_str!("src/default_settings.toml"));
    check_toml(PREPROMPTS, include_str!("src/trigger/default_preprompts.toml"));
    check_word_list(WORDS, include_str!("src/dict/default_words.tsv"));
}

fn check_toml(path: &str, content: &str) {
    if let Err(e) = toml::from_str::<toml::Table>(content) {
        panic!("{path}: invalid TOML: {e}");
    }
}

/// Same line rules as `dict::parse_word_list`: `<word>\t<freq>` or
/// `<prev> <next>\t<count>`, with `#` comments and blank lines skipped.
fn check_word_list(path: &str, content: &str) {
    let mut unigrams = 0usize;
    for (i, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, freq)) = line.split_once('\t') else {
            panic!("{path}:{}: expected <word>\\t<frequency>", i + 1);
        };
        if freq.trim().parse::<u32>().is_err() {
            panic!("{path}:{}: invalid frequency '{}'", i + 1, freq.trim());
        }
        match key.split_whitespace().count() {
            1 => unigrams += 1,
            2 => {}
            _ => panic!("{path}:{}: expected one or two words, got '{key}'", i + 1),
        }
    }
    if unigrams == 0 {
        panic!("{path}: no words");
    }
}
