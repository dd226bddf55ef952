//! Glob containment for branch filter patterns.
//!
//! Patterns use the branch filter grammar of CI triggers:
//! - `*` matches any run of characters except `/` (at most one path segment)
//! - `**` matches any run of characters, `/` included (any number of segments)
//! - every other character is literal
//!
//! Containment is decided symbolically: a wildcard in the narrower pattern can
//! only be absorbed by a wildcard in the wider pattern that is at least as
//! broad, so `*` covers `*` but never `**`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Literal(char),
    /// `*`
    Star,
    /// `**`
    DoubleStar,
}

fn tokenize(pattern: &str) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '*' {
            tokens.push(Token::Literal(c));
            continue;
        }
        if chars.peek() == Some(&'*') {
            chars.next();
            tokens.push(Token::DoubleStar);
        } else {
            tokens.push(Token::Star);
        }
    }

    tokens
}

/// Returns true if every string matched by `sub_pattern` is also matched by
/// `super_pattern`.
///
/// # Examples
///
/// ```
/// use scanhook::workflow::pattern_is_superset;
///
/// assert!(pattern_is_superset("**", "feature/*"));
/// assert!(pattern_is_superset("release/*", "release/4.1"));
/// assert!(!pattern_is_superset("*", "**"));
/// ```
pub fn pattern_is_superset(super_pattern: &str, sub_pattern: &str) -> bool {
    let sup = tokenize(super_pattern);
    let sub = tokenize(sub_pattern);
    let Some((sup, sub)) = trim_literal_ends(&sup, &sub) else {
        return false;
    };
    let width = sub.len() + 1;

    // `next[j]` holds whether `sup[i + 1..]` covers `sub[j..]`; `row` is filled
    // for `sup[i..]`, right to left. Only two rows are ever alive.
    let mut next = vec![false; width];
    next[sub.len()] = true;
    let mut row = vec![false; width];

    for token in sup.iter().rev() {
        for j in (0..width).rev() {
            let skip = next[j];
            let absorbs = match (token, sub.get(j)) {
                (_, None) => false,
                // `**` absorbs the next token of any kind and stays open.
                (Token::DoubleStar, Some(_)) => row[j + 1],
                // `*` absorbs a non-separator literal, or another `*`.
                (Token::Star, Some(Token::Star)) => row[j + 1],
                (Token::Star, Some(Token::Literal(c))) => *c != '/' && row[j + 1],
                (Token::Star, Some(Token::DoubleStar)) => false,
                (Token::Literal(a), Some(Token::Literal(b))) => a == b && next[j + 1],
                (Token::Literal(_), Some(_)) => false,
            };
            row[j] = match token {
                Token::Literal(_) => absorbs,
                Token::Star | Token::DoubleStar => skip || absorbs,
            };
        }
        std::mem::swap(&mut next, &mut row);
    }

    next[0]
}

/// Peel literals off both ends of `sup`. A literal at either end of the wider
/// pattern must meet the same literal at that end of the narrower one.
fn trim_literal_ends<'a>(
    mut sup: &'a [Token],
    mut sub: &'a [Token],
) -> Option<(&'a [Token], &'a [Token])> {
    while let [Token::Literal(a), sup_rest @ ..] = sup {
        match sub {
            [Token::Literal(b), sub_rest @ ..] if a == b => {
                sup = sup_rest;
                sub = sub_rest;
            }
            _ => return None,
        }
    }
    while let [sup_rest @ .., Token::Literal(a)] = sup {
        match sub {
            [sub_rest @ .., Token::Literal(b)] if a == b => {
                sup = sup_rest;
                sub = sub_rest;
            }
            _ => return None,
        }
    }
    Some((sup, sub))
}
