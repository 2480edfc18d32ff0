//! Combinational simulation of a (possibly sequential) AIG driven by an
//! external counter-example trace, and the ASCII reader for that trace
//! format.
//!
//! Both pieces only need [`Aig`]'s public iteration and fanin accessors, so
//! they live outside `aig.rs` the way the AIGER codec does.

use std::io::BufRead;

use fixedbitset::FixedBitSet;
use log::trace;

use crate::aig::Aig;
use crate::error::{AigError, Result};
use crate::literal::Literal;

/// One simulation frame: the value of every node, keyed by literal.
///
/// Values are stored on positive literals only; reading a negated literal
/// XORs in its polarity, matching the accessor contract values\[f\] =
/// stored\[positive(f)\] ^ is_negated(f).
#[derive(Debug, Clone)]
pub struct Frame {
    bits: FixedBitSet,
}

impl Frame {
    fn new(n_nodes: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(n_nodes),
        }
    }

    /// The value of literal `f` in this frame.
    pub fn get(&self, f: Literal) -> bool {
        self.bits[f.id() as usize] ^ f.is_negated()
    }

    fn set(&mut self, f: Literal, value: bool) {
        self.bits.set(f.id() as usize, value ^ f.is_negated());
    }
}

/// Drives `aig` through the frames of `pi_values`, starting latches at
/// `latch_values`, and returns one [`Frame`] snapshot per step.
///
/// Frame `k` holds: PIs overwritten from `pi_values[k]`, every AND gate
/// evaluated in construction order (`v[f] = v[left] & v[right]`), and
/// whatever latch values were live entering that frame. The next frame's
/// latch values are read from each latch's `next` literal under the frame
/// just computed.
///
/// # Panics
///
/// Panics if `latch_values.len() != aig.n_latches()`, or if any
/// `pi_values[k].len() != aig.n_pis()`.
pub fn simulate(aig: &Aig, latch_values: &[bool], pi_values: &[Vec<bool>]) -> Vec<Frame> {
    let latches: Vec<Literal> = aig.latches().collect();
    let pis: Vec<Literal> = aig.pis().collect();
    assert_eq!(
        latch_values.len(),
        latches.len(),
        "simulate: wrong number of initial latch values"
    );

    let mut current_latches: Vec<bool> = latch_values.to_vec();
    let mut frames = Vec::with_capacity(pi_values.len());

    for (k, step) in pi_values.iter().enumerate() {
        assert_eq!(step.len(), pis.len(), "simulate: frame {} has the wrong PI count", k);

        let mut frame = Frame::new(aig.n_nodes());
        for (&latch, &v) in latches.iter().zip(&current_latches) {
            frame.set(latch, v);
        }
        for (&pi, &v) in pis.iter().zip(step) {
            frame.set(pi, v);
        }
        for f in aig.and_gates() {
            let (l, r) = aig.and_fanins(f);
            let v = frame.get(l) & frame.get(r);
            trace!("simulate: frame {} gate {} = {}", k, f, v);
            frame.set(f, v);
        }

        current_latches = latches
            .iter()
            .map(|&l| match aig.latch_next(l) {
                Some(next) => frame.get(next),
                None => false,
            })
            .collect();
        frames.push(frame);
    }

    frames
}

/// A parsed AIGER-witness-style counter-example trace.
#[derive(Debug, Clone)]
pub struct CexWitness {
    /// The `result` line (first non-skipped line), verbatim.
    pub result: String,
    /// The `prop` line (second non-skipped line), verbatim.
    pub prop: String,
    /// The initial latch assignment, one entry per latch.
    pub init_latches: Vec<bool>,
    /// The per-step PI assignments, one entry per frame.
    pub pi_frames: Vec<Vec<bool>>,
}

fn parse_bits(line: &str, offset: usize) -> Result<Vec<bool>> {
    line.chars()
        .map(|c| match c {
            '0' => Ok(false),
            '1' => Ok(true),
            other => Err(AigError::malformed_at(
                format!("expected '0' or '1' in counter-example trace, found `{}`", other),
                offset,
            )),
        })
        .collect()
}

/// Reads an AIGER-witness-like ASCII counter-example.
///
/// Blank lines and lines starting with `u` or `c` are skipped. The first
/// surviving line is `result`, the second is `prop`, the third is the
/// initial latch assignment, and subsequent lines are per-step PI
/// assignments until a line containing only `.` terminates the trace.
pub fn read_cex(r: &mut impl BufRead) -> Result<CexWitness> {
    let mut offset = 0usize;
    let mut next_line = |r: &mut dyn BufRead| -> Result<Option<String>> {
        loop {
            let mut line = String::new();
            let n = r.read_line(&mut line).map_err(AigError::from)?;
            if n == 0 {
                return Ok(None);
            }
            offset += n;
            let trimmed = line.trim_end_matches(['\n', '\r']).to_string();
            if trimmed.is_empty() || trimmed.starts_with('u') || trimmed.starts_with('c') {
                continue;
            }
            return Ok(Some(trimmed));
        }
    };

    let result = next_line(r)?
        .ok_or_else(|| AigError::malformed_at("counter-example witness missing `result` line", offset))?;
    let prop = next_line(r)?
        .ok_or_else(|| AigError::malformed_at("counter-example witness missing `prop` line", offset))?;
    let init_line = next_line(r)?.ok_or_else(|| {
        AigError::malformed_at("counter-example witness missing initial latch assignment", offset)
    })?;
    let init_latches = parse_bits(&init_line, offset)?;

    let mut pi_frames = Vec::new();
    loop {
        let line = next_line(r)?
            .ok_or_else(|| AigError::malformed_at("counter-example witness missing `.` terminator", offset))?;
        if line == "." {
            break;
        }
        pi_frames.push(parse_bits(&line, offset)?);
    }

    Ok(CexWitness {
        result,
        prop,
        init_latches,
        pi_frames,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aig::PoType;
    use crate::node::LatchInit;
    use std::io::Cursor;

    fn counter(width: usize) -> (Aig, Literal) {
        let mut aig = Aig::new();
        let enable = aig.create_pi(Some("enable"));
        let mut latches = Vec::with_capacity(width);
        for _ in 0..width {
            latches.push(aig.create_latch(LatchInit::Zero, None, None));
        }
        let mut carry = enable;
        for &latch in &latches {
            let toggled = aig.create_xor(latch, carry);
            aig.set_next(latch, toggled);
            carry = aig.create_and(latch, carry);
        }
        for &latch in &latches {
            aig.create_po(latch, PoType::Output, None);
        }
        (aig, enable)
    }

    #[test]
    fn simulates_a_binary_counter() {
        let (aig, _enable) = counter(3);
        let latch_values = vec![false, false, false];
        let pi_values: Vec<Vec<bool>> = (0..8).map(|_| vec![true]).collect();
        let frames = simulate(&aig, &latch_values, &pi_values);

        let latches: Vec<Literal> = aig.latches().collect();
        let bit0: Vec<bool> = frames.iter().map(|f| f.get(latches[0])).collect();
        assert_eq!(bit0, vec![true, false, true, false, true, false, true, false]);

        let bit1: Vec<bool> = frames.iter().map(|f| f.get(latches[1])).collect();
        assert_eq!(bit1, vec![false, false, true, true, false, false, true, true]);

        let bit2: Vec<bool> = frames.iter().map(|f| f.get(latches[2])).collect();
        assert_eq!(bit2, vec![false, false, false, false, true, true, true, true]);
    }

    #[test]
    fn and_gate_matches_conjunction_of_fanins() {
        let mut aig = Aig::new();
        let a = aig.create_pi(None);
        let b = aig.create_pi(None);
        let g = aig.create_and(a, b);
        aig.create_po(g, PoType::Output, None);

        for &av in &[false, true] {
            for &bv in &[false, true] {
                let frames = simulate(&aig, &[], &[vec![av, bv]]);
                assert_eq!(frames[0].get(g), av & bv);
            }
        }
    }

    #[test]
    fn reads_a_counter_example_witness() {
        let text = "0\n1\nu comment\n000\n1\n1\n1\nc trailing\n.\n";
        let mut cursor = Cursor::new(text.as_bytes());
        let witness = read_cex(&mut cursor).unwrap();
        assert_eq!(witness.result, "0");
        assert_eq!(witness.prop, "1");
        assert_eq!(witness.init_latches, vec![false, false, false]);
        assert_eq!(witness.pi_frames, vec![vec![true], vec![true], vec![true]]);
    }
}
