/// Identifies one attempt of a flow (a watch session, an edit request, a copy window).
/// Asynchronous completions carry the token they were issued for and are dropped when
/// it no longer matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionToken(u64);

impl SessionToken {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Hands out strictly increasing tokens; never reuses one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSource {
    next: u64,
}

impl Default for TokenSource {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl TokenSource {
    pub fn issue(&mut self) -> SessionToken {
        let token = SessionToken(self.next);
        self.next += 1;
        token
    }
}
