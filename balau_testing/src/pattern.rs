//! Selection of test cases by glob pattern.
//!
//! Patterns are matched against qualified names such as `LibTest::test`.
//! `*` matches any run of characters (including `::`) and `?` matches one
//! character. A leading `!` turns a pattern into an exclusion. Each glob is
//! compiled to an anchored regular expression.

use regex::RegexSet;

use crate::error::HarnessError;

/// Compiled include and exclude patterns.
#[derive(Debug, Clone)]
pub struct Selection {
    include: RegexSet,
    exclude: RegexSet,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            include: RegexSet::empty(),
            exclude: RegexSet::empty(),
        }
    }
}

impl Selection {
    /// Compiles `patterns`, trimming each and ignoring blank entries.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::InvalidPattern`] when the compiled expressions
    /// exceed the regex size limits.
    ///
    /// # Examples
    ///
    /// ```
    /// use balau_testing::pattern::Selection;
    ///
    /// let selection = Selection::new(["*Test::*"])?;
    /// assert!(selection.selects("LibTest::test"));
    /// assert!(!selection.selects("LibIT::test"));
    /// # Ok::<(), balau_testing::HarnessError>(())
    /// ```
    pub fn new<I, S>(patterns: I) -> Result<Self, HarnessError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut include = Vec::new();
        let mut exclude = Vec::new();
        for raw in patterns {
            let pattern = raw.as_ref().trim();
            if let Some(negated) = pattern.strip_prefix('!') {
                if !negated.is_empty() {
                    exclude.push(negated.to_owned());
                }
            } else if !pattern.is_empty() {
                include.push(pattern.to_owned());
            }
        }
        Ok(Self {
            include: compile(&include)?,
            exclude: compile(&exclude)?,
        })
    }

    /// Returns whether `qualified_name` is selected.
    ///
    /// A name is selected when it matches an include pattern, or there are no
    /// include patterns, and it matches no exclude pattern.
    #[must_use]
    pub fn selects(&self, qualified_name: &str) -> bool {
        let included = self.include.is_empty() || self.include.is_match(qualified_name);
        included && !self.exclude.is_match(qualified_name)
    }
}

fn compile(globs: &[String]) -> Result<RegexSet, HarnessError> {
    RegexSet::new(globs.iter().map(|glob| glob_to_regex(glob))).map_err(|source| {
        HarnessError::InvalidPattern {
            patterns: globs.join(" "),
            source,
        }
    })
}

fn glob_to_regex(glob: &str) -> String {
    let mut expression = String::from("(?s)^");
    let mut buf = [0_u8; 4];
    for ch in glob.chars() {
        match ch {
            '*' => expression.push_str(".*"),
            '?' => expression.push('.'),
            other => expression.push_str(&regex::escape(other.encode_utf8(&mut buf))),
        }
    }
    expression.push('$');
    expression
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&["*Test::*"], "LibTest::test", true)]
    #[case(&["*Test::*"], "LibIT::test", false)]
    #[case(&["*IT::*"], "LibIT::test", true)]
    #[case(&["Lib*"], "LibIT::test", true)]
    #[case(&["LibTest::tes?"], "LibTest::test", true)]
    #[case(&["LibTest::tes?"], "LibTest::tests", false)]
    #[case(&["*"], "LibIT::test", true)]
    #[case(&[], "LibIT::test", true)]
    #[case(&["  "], "LibIT::test", true)]
    #[case(&["!*IT::*"], "LibIT::test", false)]
    #[case(&["!*IT::*"], "LibTest::test", true)]
    #[case(&["Lib*", "!LibTest::*"], "LibTest::test", false)]
    #[case(&["*Test::*", "*IT::*"], "LibIT::test", true)]
    #[case(&[" *Test::* "], "LibTest::test", true)]
    fn selects_by_pattern(#[case] patterns: &[&str], #[case] name: &str, #[case] expected: bool) {
        let selection = Selection::new(patterns).expect("compile patterns");
        assert_eq!(selection.selects(name), expected);
    }

    #[rstest]
    #[case("a*b*c", "axxbyyc", true)]
    #[case("a*b*c", "axxbyy", false)]
    #[case("*::*", "A::B", true)]
    #[case("Lib.Test", "LibXTest", false)]
    #[case("Lib(IT)", "Lib(IT)", true)]
    #[case("Lib[IT]", "LibI", false)]
    #[case("*", "Line\nBreak", true)]
    fn regex_metacharacters_are_literal(
        #[case] pattern: &str,
        #[case] name: &str,
        #[case] expected: bool,
    ) {
        let selection = Selection::new([pattern]).expect("compile pattern");
        assert_eq!(selection.selects(name), expected);
    }

    #[rstest]
    fn default_selects_everything() {
        assert!(Selection::default().selects("AnyGroup::any"));
    }
}
