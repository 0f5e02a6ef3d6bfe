use crate::config::{MAX_KEYWORDS, MIN_TOKEN_CHARS};
use crate::html::strip_markup;
use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use std::collections::{HashMap, HashSet};

lazy_static! {
    static ref RE: Regex = Regex::new(r"\w+").expect("valid regex");
    static ref STOPWORDS: HashSet<&'static str> = {
        let spanish: &[&str] = &[
            "el","la","los","las","lo","un","una","unos","unas","al","del",
            "yo","tu","él","ella","ello","ellos","ellas","nosotros","nosotras","vosotros","vosotras","usted","ustedes",
            "me","te","se","nos","os","le","les","mi","mis","tus","su","sus","nuestro","nuestra","nuestros","nuestras",
            "vuestro","vuestra","suyo","suya","mío","mía","tuyo","tuya",
            "este","esta","estos","estas","esto","ese","esa","esos","esas","eso","aquel","aquella","aquellos","aquellas",
            "que","qué","quien","quién","quienes","cual","cuál","cuales","cuyo","cuya","donde","dónde","cuando","cuándo","como","cómo","cuanto","cuánto",
            "a","ante","bajo","con","contra","de","desde","durante","en","entre","hacia","hasta","mediante","para","por","según","sin","sobre","tras",
            "y","e","o","u","ni","pero","sino","aunque","porque","pues","entonces","mientras","además","también","tampoco",
            "ser","soy","eres","es","somos","son","era","eran","fue","fueron","sea","sean","sido","siendo",
            "estar","estoy","está","están","estaba","estaban","estado",
            "haber","he","has","ha","hay","hemos","han","había","habían","habido",
            "tener","tiene","tienen","tenía","tenemos","hacer","hace","hacen","hecho","puede","pueden","poder","podemos","debe","deben",
            "muy","más","menos","mucho","mucha","muchos","muchas","poco","poca","pocos","pocas","todo","toda","todos","todas",
            "otro","otra","otros","otras","mismo","misma","mismos","mismas","cada","algún","alguno","alguna","algunos","algunas",
            "ningún","ninguno","ninguna","nada","algo","tan","tanto","tanta","ya","aún","aun","solo","sólo","así","aquí","allí","ahí",
            "bien","mal","siempre","nunca","ahora","luego","después","antes","hoy","sí","no","vez","veces","parte",
        ];
        let english: &[&str] = &[
            "a","about","above","after","again","against","all","also","am","an","and","any","are","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","cannot","could","did","do","does","doing","down","during",
            "each","few","for","from","further","get","gets","got",
            "had","has","have","having","he","her","here","hers","herself","him","himself","his","how",
            "i","if","in","into","is","it","its","itself","just",
            "may","me","might","more","most","must","my","myself",
            "no","nor","not","now","of","off","on","once","only","or","other","our","ours","ourselves","out","over","own",
            "same","she","should","so","some","such",
            "than","that","the","their","theirs","them","themselves","then","there","these","they","this","those","through","to","too",
            "under","until","up","use","used","using","very",
            "was","we","were","what","when","where","which","while","who","whom","why","will","with","would",
            "you","your","yours","yourself","yourselves",
        ];
        spanish.iter().chain(english.iter()).copied().collect()
    };
}

pub fn is_stopword(token: &str) -> bool { STOPWORDS.contains(token) }

fn keep_token(token: &str) -> bool {
    token.chars().count() >= MIN_TOKEN_CHARS
        && token.chars().any(char::is_alphabetic)
        && !is_stopword(token)
}

/// Tokenize plain text into (term, position): NFKC, lowercase, word-character runs,
/// dropping short, numeric and stopword tokens. Positions count every raw token.
pub fn tokenize(text: &str) -> Vec<(String, usize)> {
    let normalized = text.nfkc().collect::<String>().to_lowercase();
    let mut tokens = Vec::new();
    for (pos, mat) in RE.find_iter(&normalized).enumerate() {
        let token = mat.as_str();
        if !keep_token(token) { continue; }
        tokens.push((token.to_string(), pos));
    }
    tokens
}

/// Normalize a single query term the way document tokens are normalized.
pub fn normalize_term(term: &str) -> String {
    term.trim().nfkc().collect::<String>().to_lowercase()
}

/// Rank terms by frequency, ties broken by first occurrence, capped at `limit`.
pub fn rank_terms<I: IntoIterator<Item = String>>(terms: I, limit: usize) -> Vec<String> {
    let mut counts: HashMap<String, (u32, usize)> = HashMap::new();
    for term in terms {
        let first_seen = counts.len();
        counts.entry(term).or_insert((0, first_seen)).0 += 1;
    }
    let mut ranked: Vec<(String, u32, usize)> = counts.into_iter().map(|(t, (c, first))| (t, c, first)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.into_iter().take(limit).map(|(t, _, _)| t).collect()
}

/// Top keywords of a raw HTML document. The title is appended to the text so
/// title terms gain weight.
pub fn extract_keywords(html: &str, title: &str) -> Vec<String> {
    let mut source = String::with_capacity(html.len() + title.len() + 1);
    source.push_str(html);
    source.push(' ');
    source.push_str(title);
    let text = strip_markup(&source);
    rank_terms(tokenize(&text).into_iter().map(|(t, _)| t), MAX_KEYWORDS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_tokenize() {
        let t = tokenize("Protección de redes, 2024 y SSH!");
        let words: Vec<&str> = t.iter().map(|(w, _)| w.as_str()).collect();
        assert_eq!(words, vec!["protección", "redes", "ssh"]);
        assert_eq!(t[2].1, 5);
    }

    #[test]
    fn ranks_by_frequency_then_first_seen() {
        let terms = ["beta", "alpha", "gamma", "alpha", "beta", "delta"].map(String::from);
        assert_eq!(rank_terms(terms, 3), vec!["beta", "alpha", "gamma"]);
    }

    #[test]
    fn keywords_are_capped_and_unique() {
        let html: String = (0..40).map(|i| format!("<p>palabra{i} palabra{i}</p>")).collect();
        let kws = extract_keywords(&html, "");
        assert_eq!(kws.len(), MAX_KEYWORDS);
        let unique: HashSet<&String> = kws.iter().collect();
        assert_eq!(unique.len(), kws.len());
        assert_eq!(kws[0], "palabra0");
    }
}
