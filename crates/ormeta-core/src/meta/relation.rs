/// Cardinality and direction of the relation a member participates in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RelationType {
    #[default]
    None,
    OneToOneUni,
    OneToOneBi,
    OneToManyUni,
    OneToManyBi,
    ManyToOneUni,
    ManyToOneBi,
    ManyToManyBi,
}

impl RelationType {
    pub fn is_relation(self) -> bool {
        self != Self::None
    }

    pub fn is_bidirectional(self) -> bool {
        matches!(
            self,
            Self::OneToOneBi | Self::OneToManyBi | Self::ManyToOneBi | Self::ManyToManyBi
        )
    }

    /// True when the member holds several related objects.
    pub fn is_multi_valued(self) -> bool {
        matches!(
            self,
            Self::OneToManyUni | Self::OneToManyBi | Self::ManyToManyBi
        )
    }
}
