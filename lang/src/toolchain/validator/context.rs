use crate::toolchain::lexer::vocabulary::DelimiterPair;
use crate::toolchain::lexer::TokenIndex;

pub struct StackEntry {
    pub pair: DelimiterPair,
    pub token_index: TokenIndex,
}

/// The open delimiter stack of a single validation pass.
pub struct Context {
    states: Vec<StackEntry>,
}

impl Context {
    pub fn new() -> Context {
        Context { states: Vec::new() }
    }

    pub fn push_state(&mut self, pair: DelimiterPair, token_index: TokenIndex) {
        self.states.push(StackEntry { pair, token_index });
    }

    pub fn state(&self) -> Option<&StackEntry> {
        self.states.last()
    }

    pub fn pop_state(&mut self) -> Option<StackEntry> {
        self.states.pop()
    }

    pub fn depth(&self) -> usize {
        self.states.len()
    }
}
