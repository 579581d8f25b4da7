//! Actions and the per-step legality mask.

use std::fmt;

/// An index into the action space `[0, K]`.
///
/// `0..K` select a waiting customer by position in the arrival-ordered
/// waiting list; `K` is HOLD.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Action(pub usize);

impl Action {
    /// The HOLD action for a queue view of capacity `k`.
    #[inline]
    pub fn hold(k: usize) -> Action {
        Action(k)
    }

    #[inline]
    pub fn is_hold(self, k: usize) -> bool {
        self.0 == k
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Action({})", self.0)
    }
}

/// Which of the `K + 1` actions are legal at the current decision point.
///
/// HOLD (index `K`) is always legal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionMask {
    legal: Vec<bool>,
}

impl ActionMask {
    /// A mask for capacity `k` with only HOLD legal.
    pub fn hold_only(k: usize) -> Self {
        let mut legal = vec![false; k + 1];
        legal[k] = true;
        Self { legal }
    }

    /// Mark customer position `index` legal.  Positions `>= K` are ignored.
    pub fn allow(&mut self, index: usize) {
        if index < self.capacity() {
            self.legal[index] = true;
        }
    }

    /// Queue capacity `K` (the mask has `K + 1` entries).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.legal.len() - 1
    }

    #[inline]
    pub fn hold(&self) -> Action {
        Action(self.capacity())
    }

    #[inline]
    pub fn is_legal(&self, action: Action) -> bool {
        self.legal.get(action.0).copied().unwrap_or(false)
    }

    /// Legal actions in ascending order; HOLD is always last.
    pub fn legal_actions(&self) -> impl Iterator<Item = Action> + '_ {
        self.legal
            .iter()
            .enumerate()
            .filter(|&(_, &ok)| ok)
            .map(|(i, _)| Action(i))
    }

    /// Number of legal customer positions (HOLD excluded).
    pub fn legal_customer_count(&self) -> usize {
        self.legal[..self.capacity()].iter().filter(|&&ok| ok).count()
    }

    /// Raw flags, length `K + 1`, for handing to a model.
    pub fn as_slice(&self) -> &[bool] {
        &self.legal
    }
}
