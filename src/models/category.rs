/// The fixed set of categories a salary can be split across.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum AllocationCategory {
    Housing,
    Transportation,
    Food,
    Utilities,
    Entertainment,
    Savings,
    Investment,
}

impl AllocationCategory {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Housing => "housing",
            Self::Transportation => "transportation",
            Self::Food => "food",
            Self::Utilities => "utilities",
            Self::Entertainment => "entertainment",
            Self::Savings => "savings",
            Self::Investment => "investment",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "housing" => Some(Self::Housing),
            "transportation" | "transport" => Some(Self::Transportation),
            "food" => Some(Self::Food),
            "utilities" => Some(Self::Utilities),
            "entertainment" => Some(Self::Entertainment),
            "savings" => Some(Self::Savings),
            "investment" => Some(Self::Investment),
            _ => None,
        }
    }

    /// All categories, in the order allocations are entered and stored.
    pub(crate) fn all() -> &'static [AllocationCategory] {
        &[
            Self::Housing,
            Self::Transportation,
            Self::Food,
            Self::Utilities,
            Self::Entertainment,
            Self::Savings,
            Self::Investment,
        ]
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for AllocationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw percentage inputs, one slot per category. Slots left unset hold an
/// empty string, which fails to parse like any other bad input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct AllocationInputs {
    raw: [String; 7],
}

impl AllocationInputs {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set(&mut self, category: AllocationCategory, raw: impl Into<String>) {
        self.raw[category.index()] = raw.into();
    }

    pub(crate) fn with(mut self, category: AllocationCategory, raw: impl Into<String>) -> Self {
        self.set(category, raw);
        self
    }

    pub(crate) fn get(&self, category: AllocationCategory) -> &str {
        &self.raw[category.index()]
    }

    /// Fill slots from positional values in `AllocationCategory::all()` order.
    pub(crate) fn from_positional<S: AsRef<str>>(values: &[S]) -> Self {
        let mut inputs = Self::new();
        for (category, value) in AllocationCategory::all().iter().zip(values) {
            inputs.set(*category, value.as_ref());
        }
        inputs
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (AllocationCategory, &str)> {
        AllocationCategory::all()
            .iter()
            .map(move |c| (*c, self.get(*c)))
    }
}
