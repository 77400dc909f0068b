//! `:nth-child()` arguments.
//! See <https://www.w3.org/TR/selectors-4/#anb-microsyntax>

/// The `An+B` rule: matches 1-based index `i` when `i = step * n + offset`
/// for some `n >= 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NthChild {
    pub step: i32,
    pub offset: i32,
}

impl NthChild {
    #[inline]
    pub const fn new(step: i32, offset: i32) -> Self {
        Self { step, offset }
    }

    /// Parse `odd`, `even`, `N` or `An+B` (whitespace around the sign allowed).
    pub fn parse(text: &str) -> Option<Self> {
        let compact = text
            .chars()
            .filter(|character| !character.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        match compact.as_str() {
            "" => return None,
            "odd" => return Some(Self::new(2, 1)),
            "even" => return Some(Self::new(2, 0)),
            _ => {}
        }
        let Some(split) = compact.find('n') else {
            return compact.parse().ok().map(|offset| Self::new(0, offset));
        };
        let (head, tail) = compact.split_at(split);
        let step = match head {
            "" | "+" => 1,
            "-" => -1,
            number => number.parse().ok()?,
        };
        let rest = tail.get(1..).unwrap_or_default();
        let offset = if rest.is_empty() {
            0
        } else if rest.starts_with('+') || rest.starts_with('-') {
            rest.trim_start_matches('+').parse().ok()?
        } else {
            return None;
        };
        Some(Self::new(step, offset))
    }

    /// Whether the 1-based `index` is selected.
    pub fn matches(self, index: usize) -> bool {
        let Ok(position) = i64::try_from(index) else {
            return false;
        };
        let step = i64::from(self.step);
        let distance = position - i64::from(self.offset);
        if step == 0 {
            return distance == 0;
        }
        distance % step == 0 && distance / step >= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_and_formulas() {
        assert_eq!(NthChild::parse("odd"), Some(NthChild::new(2, 1)));
        assert_eq!(NthChild::parse("EVEN"), Some(NthChild::new(2, 0)));
        assert_eq!(NthChild::parse("3"), Some(NthChild::new(0, 3)));
        assert_eq!(NthChild::parse("2n + 1"), Some(NthChild::new(2, 1)));
        assert_eq!(NthChild::parse("-n+3"), Some(NthChild::new(-1, 3)));
        assert_eq!(NthChild::parse("n"), Some(NthChild::new(1, 0)));
        assert_eq!(NthChild::parse("3n-1"), Some(NthChild::new(3, -1)));
        assert_eq!(NthChild::parse("2n1"), None);
        assert_eq!(NthChild::parse("x"), None);
    }

    #[test]
    fn index_selection() {
        let odd = NthChild::new(2, 1);
        assert!(odd.matches(1) && odd.matches(3) && !odd.matches(2));
        let first_three = NthChild::new(-1, 3);
        assert!(first_three.matches(1) && first_three.matches(3) && !first_three.matches(4));
        let second = NthChild::new(0, 2);
        assert!(second.matches(2) && !second.matches(1) && !second.matches(4));
        let from_minus = NthChild::new(3, -1);
        assert!(from_minus.matches(2) && from_minus.matches(5) && !from_minus.matches(1));
    }
}
