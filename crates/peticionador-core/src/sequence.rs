//! Caller-side staleness guard for collaborator responses.
//!
//! Requests are never cancelled; a newer request of the same kind supersedes
//! an older one, so a response is only applied if its ticket is still the
//! latest issued for that kind.

/// Kinds of request whose responses mutate session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Analysis,
    Generation,
}

/// Issued when a request starts; presented again when its response arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    kind: RequestKind,
    seq: u64,
}

impl Ticket {
    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

#[derive(Debug, Default)]
pub struct RequestSequence {
    next: u64,
    latest_analysis: Option<u64>,
    latest_generation: Option<u64>,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request of `kind`, superseding any earlier one of that kind.
    pub fn begin(&mut self, kind: RequestKind) -> Ticket {
        self.next += 1;
        let seq = self.next;
        *self.latest_mut(kind) = Some(seq);
        tracing::debug!(?kind, seq, "request started");
        Ticket { kind, seq }
    }

    /// Whether the response for `ticket` may still be applied.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        let latest = match ticket.kind {
            RequestKind::Analysis => self.latest_analysis,
            RequestKind::Generation => self.latest_generation,
        };
        latest == Some(ticket.seq)
    }

    fn latest_mut(&mut self, kind: RequestKind) -> &mut Option<u64> {
        match kind {
            RequestKind::Analysis => &mut self.latest_analysis,
            RequestKind::Generation => &mut self.latest_generation,
        }
    }
}
