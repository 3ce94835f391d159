//! Ordered rule tables.
//!
//! A [`RuleSet`] holds `(priority, predicate, effect)` rules plus a default.
//! Evaluation returns the effect of the highest-priority matching rule; among
//! equal priorities the rule declared first wins.

/// One rule in a [`RuleSet`].
pub struct Rule<F, T> {
    pub priority: u32,
    pub name: &'static str,
    pub when: fn(&F) -> bool,
    pub then: T,
}

impl<F, T: std::fmt::Debug> std::fmt::Debug for Rule<F, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("priority", &self.priority)
            .field("name", &self.name)
            .field("then", &self.then)
            .finish()
    }
}

/// Prioritized rules over facts `F` producing effects `T`.
#[derive(Debug)]
pub struct RuleSet<F, T> {
    rules: Vec<Rule<F, T>>,
    default: T,
}

impl<F, T> RuleSet<F, T> {
    pub fn new(default: T) -> Self {
        Self {
            rules: Vec::new(),
            default,
        }
    }

    /// Add a rule (builder style).
    pub fn rule(mut self, priority: u32, name: &'static str, when: fn(&F) -> bool, then: T) -> Self {
        self.rules.push(Rule {
            priority,
            name,
            when,
            then,
        });
        self
    }

    /// The winning rule for `facts`, if any rule matches.
    pub fn matching(&self, facts: &F) -> Option<&Rule<F, T>> {
        self.rules
            .iter()
            .filter(|rule| (rule.when)(facts))
            .fold(None, |best: Option<&Rule<F, T>>, rule| match best {
                Some(b) if b.priority >= rule.priority => Some(b),
                _ => Some(rule),
            })
    }

    /// Effect of the winning rule, or the default.
    pub fn evaluate(&self, facts: &F) -> &T {
        self.matching(facts).map_or(&self.default, |rule| &rule.then)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
