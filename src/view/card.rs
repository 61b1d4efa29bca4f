// src/view/card.rs

/// Identifies one in-flight transition. A settle event only counts if it
/// carries the ticket of the transition the card is currently in.
pub type Ticket = u64;

/// Expand/collapse lifecycle of one card:
/// `Collapsed -> Expanding -> Expanded -> Collapsing -> Collapsed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardPhase {
    #[default]
    Collapsed,
    Expanding(Ticket),
    Expanded,
    Collapsing(Ticket),
}

impl CardPhase {
    /// Card spans the full grid row.
    pub fn is_wide(self) -> bool {
        !matches!(self, CardPhase::Collapsed)
    }

    /// Detail panel is open.
    pub fn is_open(self) -> bool {
        matches!(self, CardPhase::Expanded)
    }

    /// "See Details" is hidden from the moment the panel opens until the
    /// card has fully collapsed again.
    pub fn shows_details_button(self) -> bool {
        matches!(self, CardPhase::Collapsed | CardPhase::Expanding(_))
    }

    /// Expanded or on its way there.
    pub fn is_expanding_or_expanded(self) -> bool {
        matches!(self, CardPhase::Expanding(_) | CardPhase::Expanded)
    }

    pub fn pending_ticket(self) -> Option<Ticket> {
        match self {
            CardPhase::Expanding(t) | CardPhase::Collapsing(t) => Some(t),
            _ => None,
        }
    }

    /// Next phase once the current transition has finished.
    /// Stale tickets and settled phases leave the phase unchanged.
    pub fn settle(self, ticket: Ticket) -> CardPhase {
        match self {
            CardPhase::Expanding(t) if t == ticket => CardPhase::Expanded,
            CardPhase::Collapsing(t) if t == ticket => CardPhase::Collapsed,
            other => other,
        }
    }

    /// Start closing. An expanding card never opened its panel, so it goes
    /// straight back to collapsed.
    pub fn close(self, ticket: Ticket) -> CardPhase {
        match self {
            CardPhase::Expanded => CardPhase::Collapsing(ticket),
            CardPhase::Expanding(_) => CardPhase::Collapsed,
            other => other,
        }
    }

    pub fn open(self, ticket: Ticket) -> CardPhase {
        match self {
            CardPhase::Collapsed | CardPhase::Collapsing(_) => CardPhase::Expanding(ticket),
            other => other,
        }
    }
}
