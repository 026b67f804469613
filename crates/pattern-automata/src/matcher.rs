//! A pattern compiled once and matched many times.

use crate::automaton::{DfaDesign, NfaDesign, StateSet};
use crate::error::Result;
use crate::pattern::Pattern;
use log::debug;

/// Which automaton runs the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Engine {
    /// Simulate the Thompson NFA directly. Cheap to build, every step walks a
    /// set of states.
    Nfa,
    /// Convert the NFA by subset construction first. Every step is a single
    /// lookup, but building can take time and memory exponential in the size
    /// of the NFA.
    #[default]
    Dfa,
}

/// Configuration for a [`Matcher`].
#[derive(Debug, Clone, Default)]
pub struct Config {
    engine: Engine,
}

impl Config {
    /// Create a new configuration using the default [`Engine::Dfa`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the engine used for matching.
    pub fn with_engine(mut self, engine: Engine) -> Self {
        self.engine = engine;
        self
    }

    /// The engine used for matching.
    pub fn engine(&self) -> Engine {
        self.engine
    }
}

#[derive(Debug, Clone)]
enum Compiled {
    Nfa(NfaDesign),
    Dfa(DfaDesign<StateSet>),
}

/// A [`Pattern`] compiled for the configured [`Engine`].
#[derive(Debug, Clone)]
pub struct Matcher {
    pattern: Pattern,
    config: Config,
    compiled: Compiled,
}

impl Matcher {
    /// Compile `pattern` with the default configuration.
    pub fn new(pattern: Pattern) -> Self {
        Self::with_config(pattern, Config::default())
    }

    /// Compile `pattern` once for the engine `config` selects.
    pub fn with_config(pattern: Pattern, config: Config) -> Self {
        let nfa_design = pattern.to_nfa_design();
        let compiled = match config.engine {
            Engine::Nfa => Compiled::Nfa(nfa_design),
            Engine::Dfa => Compiled::Dfa(nfa_design.to_dfa_design()),
        };
        debug!("Compiled /{pattern}/ for the {:?} engine", config.engine);

        Self {
            pattern,
            config,
            compiled,
        }
    }

    /// Parse `text` and compile it with the default configuration.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(Self::new(Pattern::parse(text)?))
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Check if the whole of `input` matches. Each call runs a fresh automaton.
    pub fn is_match(&self, input: &str) -> bool {
        match &self.compiled {
            Compiled::Nfa(design) => design.accepts(input),
            Compiled::Dfa(design) => design.accepts(input),
        }
    }
}
