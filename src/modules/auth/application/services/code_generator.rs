use rand::{distributions::Uniform, Rng};

use crate::config::{CodeAlphabet, CodeGenerationSettings};

const NUMERIC: &[u8] = b"0123456789";
// No 0/O or 1/I, codes are read off an email and typed back in
const ALPHANUMERIC: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// One-time codes for password reset emails.
#[derive(Debug, Clone)]
pub struct CodeGenerator {
    length: usize,
    alphabet: &'static [u8],
}

impl CodeGenerator {
    pub fn new(length: usize, alphabet: CodeAlphabet) -> Self {
        let alphabet = match alphabet {
            CodeAlphabet::Numeric => NUMERIC,
            CodeAlphabet::Alphanumeric => ALPHANUMERIC,
        };
        Self { length, alphabet }
    }

    pub fn from_settings(settings: &CodeGenerationSettings) -> Self {
        Self::new(settings.length, settings.alphabet)
    }

    pub fn generate(&self) -> String {
        let dist = Uniform::from(0..self.alphabet.len());
        rand::thread_rng()
            .sample_iter(dist)
            .take(self.length)
            .map(|i| self.alphabet[i] as char)
            .collect()
    }
}
