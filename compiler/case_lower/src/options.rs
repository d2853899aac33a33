//! Lowering options.

/// Shape of the generated clause chain.
///
/// Both shapes run exactly the same tests in the same order; they differ
/// only in how control reaches the next clause.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ChainShape {
    /// `if (t1) body1 else if (t2) body2 ...`
    #[default]
    IfElse,
    /// One labeled block per clause inside an outer labeled block. A failed
    /// test breaks out of the clause block; a finished body breaks out of
    /// the outer one.
    LabeledBlocks,
}

/// How an object pattern decides that a property is missing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum AbsencePolicy {
    /// A property holding `undefined` counts as missing.
    #[default]
    UndefinedIsAbsent,
    /// Only a key that is not present counts as missing (`"key" in value`).
    KeyPresence,
}

/// Options for [`lower_match`](crate::lower_match) and
/// [`lower_module`](crate::lower_module).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LowerOptions {
    pub chain: ChainShape,
    pub absence: AbsencePolicy,
    /// Binding name that matches anything without binding it.
    pub wildcard: String,
    /// Hint for the hidden binding holding the discriminant.
    pub discriminant_hint: String,
    /// Hint for block labels used by [`ChainShape::LabeledBlocks`].
    pub chain_label_hint: String,
}

impl Default for LowerOptions {
    fn default() -> Self {
        LowerOptions {
            chain: ChainShape::default(),
            absence: AbsencePolicy::default(),
            wildcard: "_".to_owned(),
            discriminant_hint: "caseVal".to_owned(),
            chain_label_hint: "case".to_owned(),
        }
    }
}

impl LowerOptions {
    #[must_use]
    pub fn with_chain(mut self, chain: ChainShape) -> Self {
        self.chain = chain;
        self
    }

    #[must_use]
    pub fn with_absence(mut self, absence: AbsencePolicy) -> Self {
        self.absence = absence;
        self
    }

    #[must_use]
    pub fn with_wildcard(mut self, wildcard: impl Into<String>) -> Self {
        self.wildcard = wildcard.into();
        self
    }
}
