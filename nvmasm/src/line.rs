use arrayvec::ArrayVec;
use libnvm::Op;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::diagnostic::AsmWarning;

/// Mnemonic plus at most three operands. Anything past that is dropped.
pub const MAX_TOKENS: usize = 4;
pub const MAX_OPERANDS: usize = MAX_TOKENS - 1;

/// Pseudo-instruction naming the container format. The header is always
/// written, so this assembles to nothing.
pub const SIGNATURE: &str = ".NVM0";

static SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t,]+").expect("Invalid separator regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Signature,
    Op(Op),
}

impl Directive {
    pub fn size(&self) -> usize {
        match self {
            Directive::Signature => 0,
            Directive::Op(op) => op.size(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub mnemonic: String,
    pub operands: ArrayVec<String, MAX_OPERANDS>,
}

impl Instruction {
    /// Match the mnemonic and check the operand count. Both passes go
    /// through here so a rejected line is zero bytes wide in each.
    pub fn directive(&self) -> Result<Directive, AsmWarning> {
        if self.mnemonic.eq_ignore_ascii_case(SIGNATURE) {
            return Ok(Directive::Signature);
        }

        let op = Op::from_mnemonic(&self.mnemonic)
            .ok_or_else(|| AsmWarning::UnknownInstruction(self.mnemonic.clone()))?;

        let expected = op.operand().arity();
        if self.operands.len() < expected {
            return Err(AsmWarning::MissingOperand {
                mnemonic: self.mnemonic.clone(),
                expected,
                found: self.operands.len(),
            });
        }

        Ok(Directive::Op(op))
    }

    /// Encoded width, or zero for anything [`Instruction::directive`] rejects.
    pub fn size(&self) -> usize {
        self.directive().map(|d| d.size()).unwrap_or(0)
    }

    pub fn operand(&self) -> Option<&str> {
        self.operands.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Label(String),
    Instruction(Instruction),
}

#[derive(Debug, Clone)]
pub struct SourceLine {
    pub line: Line,
    pub text: String,
    /// 1-based
    pub line_no: usize,
}

/// Strip the comment and surrounding whitespace from a raw line and split
/// what's left into tokens. Blank and comment-only lines give `None`.
pub fn normalize_line(raw: &str) -> Option<Line> {
    let code = raw.split_once(';').map_or(raw, |(code, _comment)| code);
    let code = code.trim_matches(|c: char| c.is_ascii_whitespace());

    if code.is_empty() {
        return None;
    }

    if let Some(name) = code.strip_suffix(':') {
        return Some(Line::Label(name.to_owned()));
    }

    let mut tokens = SEPARATOR
        .split(code)
        .filter(|t| !t.is_empty())
        .take(MAX_TOKENS)
        .map(str::to_owned);

    let mnemonic = tokens.next()?;
    let operands = tokens.collect::<ArrayVec<_, MAX_OPERANDS>>();

    Some(Line::Instruction(Instruction { mnemonic, operands }))
}

pub fn parse_program(program: &str) -> Vec<SourceLine> {
    program
        .lines()
        .enumerate()
        .filter_map(|(idx, text)| {
            normalize_line(text).map(|line| SourceLine {
                line,
                text: text.trim().to_owned(),
                line_no: idx + 1,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instruction(raw: &str) -> Instruction {
        match normalize_line(raw) {
            Some(Line::Instruction(i)) => i,
            other => panic!("expected instruction, got {:?}", other),
        }
    }

    #[test]
    fn skips_blank_and_comments() {
        assert_eq!(normalize_line(""), None);
        assert_eq!(normalize_line("   \t "), None);
        assert_eq!(normalize_line("; just a comment"), None);
        assert_eq!(normalize_line("   ; indented comment"), None);
    }

    #[test]
    fn label_definitions() {
        assert_eq!(normalize_line("start:"), Some(Line::Label("start".into())));
        assert_eq!(
            normalize_line("  loop:   ; top of loop"),
            Some(Line::Label("loop".into()))
        );
        // Only a trailing colon makes a label
        assert_eq!(instruction("start: push 5").mnemonic, "start:");
    }

    #[test]
    fn splits_on_spaces_tabs_and_commas() {
        let i = instruction("\tPUSH\t0x10 ; comment");
        assert_eq!(i.mnemonic, "PUSH");
        assert_eq!(i.operands.as_slice(), ["0x10"]);

        let i = instruction("op a,b , \t c");
        assert_eq!(i.operands.as_slice(), ["a", "b", "c"]);
    }

    #[test]
    fn keeps_operand_case() {
        let i = instruction("jmp MyLabel");
        assert_eq!(i.operand(), Some("MyLabel"));
    }

    #[test]
    fn drops_extra_operands() {
        let i = instruction("push 1 2 3 4 5");
        assert_eq!(i.mnemonic, "push");
        assert_eq!(i.operands.as_slice(), ["1", "2", "3"]);
    }

    #[test]
    fn directive_checks() {
        assert_eq!(
            instruction(".nvm0").directive(),
            Ok(Directive::Signature)
        );
        assert_eq!(instruction("Halt").directive(), Ok(Directive::Op(Op::HLT)));
        assert_eq!(
            instruction("frobnicate").directive(),
            Err(AsmWarning::UnknownInstruction("frobnicate".into()))
        );
        assert_eq!(
            instruction("jmp").directive(),
            Err(AsmWarning::MissingOperand {
                mnemonic: "jmp".into(),
                expected: 1,
                found: 0
            })
        );
        assert_eq!(instruction("jmp").size(), 0);
        assert_eq!(instruction("jmp 4").size(), 5);
        assert_eq!(instruction(".NVM0").size(), 0);
    }

    #[test]
    fn numbers_lines_from_one() {
        let lines = parse_program(".NVM0\n\n; hi\nstart:\n  nop\n");
        let numbers = lines.iter().map(|l| l.line_no).collect::<Vec<_>>();
        assert_eq!(numbers, vec![1, 4, 5]);
        assert_eq!(lines[2].text, "nop");
    }
}
