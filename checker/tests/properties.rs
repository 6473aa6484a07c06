use checker::CompiledAnswer;
use proptest::prelude::*;

const TEMPLATE: &str = "db.scores.find({'score':{#}})";
const OPTIONS: &[&str] = &["'$gt':50", "'$lt':90"];

fn quoted(quote: &str, key: &str) -> String {
    format!("{}{}{}", quote, key, quote)
}

/// Tokens of a submission for the range answer. Whitespace may go between
/// any two of them.
fn tokens(quotes: &[&str], reversed: bool) -> Vec<String> {
    let gt = vec![quoted(quotes[1], "$gt"), ":".into(), "50".into()];
    let lt = vec![quoted(quotes[2], "$lt"), ":".into(), "90".into()];
    let (first, second) = if reversed { (lt, gt) } else { (gt, lt) };

    let mut out: Vec<String> = ["db", ".", "scores", ".", "find", "(", "{"]
        .into_iter()
        .map(String::from)
        .collect();
    out.extend([quoted(quotes[0], "score"), ":".into(), "{".into()]);
    out.extend(first);
    out.push(",".into());
    out.extend(second);
    out.extend(["}", "}", ")"].into_iter().map(String::from));
    out
}

fn interleave(tokens: &[String], gaps: &[String]) -> String {
    let mut out = String::new();
    for (i, token) in tokens.iter().enumerate() {
        out.push_str(&gaps[i]);
        out.push_str(token);
    }
    out.push_str(&gaps[tokens.len()]);
    out
}

fn quote_style() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["", "'", "\""])
}

proptest! {
    #[test]
    fn verdict_ignores_whitespace_quotes_and_order(
        gaps in prop::collection::vec("[ \t\n]{0,3}", 21),
        quotes in prop::collection::vec(quote_style(), 3),
        reversed in any::<bool>(),
        terminated in any::<bool>(),
    ) {
        let compiled = CompiledAnswer::new(TEMPLATE, OPTIONS).unwrap();
        let mut submission = interleave(&tokens(&quotes, reversed), &gaps);
        if terminated {
            submission.push(';');
        }
        prop_assert!(compiled.matches(&submission).unwrap(), "rejected: {:?}", submission);
    }

    #[test]
    fn mismatched_closing_quote_never_matches(
        gaps in prop::collection::vec("[ \t\n]{0,3}", 21),
        reversed in any::<bool>(),
    ) {
        let compiled = CompiledAnswer::new(TEMPLATE, OPTIONS).unwrap();
        let mut toks = tokens(&["", "", ""], reversed);
        toks[7] = "\"score'".to_string();
        let submission = interleave(&toks, &gaps);
        prop_assert!(!compiled.matches(&submission).unwrap(), "accepted: {:?}", submission);
    }
}
