//! A compact binary serialization of an [`Aig`], distinct from AIGER.
//!
//! Unlike the AIGER codec this format carries no symbol table and collapses
//! BAD_STATES/JUSTICE/FAIRNESS bookkeeping into a single fairness/justice
//! section; it exists for fast save/restore of a working AIG between tool
//! invocations, not for interchange with other AIGER tooling. Nodes are
//! renumbered the same way the AIGER writer renumbers them (PIs, then
//! latches, then ANDs, in construction order) except destination ids start
//! at 2 rather than 1, leaving id 1 unused.
//!
//! The fairness/justice section's wire format (§4.2.4 step 6) gives a total
//! sentinel count but does not, on its own, let a reader split a justice
//! group's word run into its justice-POs prefix and its duplicated
//! fairness-POs suffix without knowing the fairness-PO count in advance.
//! This implementation resolves that by writing the fairness-PO count
//! explicitly, immediately after the version tag and before the total
//! count — the cheapest fully self-describing fix, and one the total-count
//! formula already presupposes the reader can reconstruct.

use std::collections::HashMap;
use std::io::{Read, Write};

use crate::aig::{Aig, PoId, PoType};
use crate::error::{AigError, Result};
use crate::literal::Literal;
use crate::node::LatchInit;

use super::{get_u, put_u};

const NONDET: u64 = 0;
const ZERO: u64 = 2;
const ONE: u64 = 3;

/// Writes `aig` in this crate's compact marshal format.
///
/// `aig` must have no remaining buffers (resolve them with
/// [`Aig::cutpoint`](crate::aig::Aig::cutpoint) first).
pub fn marshal(aig: &Aig, w: &mut impl Write) -> Result<()> {
    if aig.buffers().next().is_some() {
        return Err(AigError::not_supported(
            "cannot marshal: AIG still has unresolved buffers",
        ));
    }

    let mut dest_id: HashMap<Literal, u32> = HashMap::new();
    dest_id.insert(Literal::FALSE, 0);
    let mut next_id = 2u32;
    for f in aig.pis() {
        dest_id.insert(f, next_id);
        next_id += 1;
    }
    for f in aig.latches() {
        dest_id.insert(f, next_id);
        next_id += 1;
    }
    for f in aig.and_gates() {
        dest_id.insert(f, next_id);
        next_id += 1;
    }

    let m = |f: Literal| -> Literal {
        let id = *dest_id.get(&f.positive()).expect("marshal: literal not numbered");
        Literal::from_raw((id << 1) | (f.is_negated() as u32))
    };

    put_u(w, aig.n_pis() as u64)?;
    put_u(w, aig.n_latches() as u64)?;
    put_u(w, aig.n_ands() as u64)?;
    for f in aig.and_gates() {
        let (l, r) = aig.and_fanins(f);
        put_u(w, (m(r).raw() as u64) << 1)?;
        put_u(w, m(l).raw() as u64)?;
    }

    for f in aig.latches() {
        let next = aig
            .latch_next(f)
            .unwrap_or_else(|| panic!("marshal: latch {} has no bound next-state literal", f));
        let init_code = match aig.latch_init(f) {
            LatchInit::Nondet => NONDET,
            LatchInit::Zero => ZERO,
            LatchInit::One => ONE,
        };
        put_u(w, ((m(next).raw() as u64) << 2) | init_code)?;
    }

    let explicit_bad: Vec<PoId> = aig.po_ids_of_type(PoType::BadStates).collect();
    let outputs: Vec<PoId> = aig.po_ids_of_type(PoType::Output).collect();
    let promote_outputs = explicit_bad.is_empty() && aig.n_justice() == 0 && !outputs.is_empty();
    let bad: &[PoId] = if promote_outputs { &outputs } else { &explicit_bad };

    put_u(w, bad.len() as u64)?;
    for &po in bad {
        put_u(w, (m(aig.po_fanin(po)).raw() as u64) ^ 1)?;
    }

    let fairness: Vec<PoId> = aig.po_ids_of_type(PoType::Fairness).collect();
    let groups: Vec<&[PoId]> = aig.justice_groups().collect();
    let total_justice: usize = groups.iter().map(|g| g.len()).sum();
    let total_sentinel = total_justice + groups.len() * (fairness.len() + 1);

    put_u(w, 1)?;
    put_u(w, fairness.len() as u64)?;
    put_u(w, total_sentinel as u64)?;
    for group in &groups {
        for &po in *group {
            put_u(w, m(aig.po_fanin(po)).raw() as u64)?;
        }
        for &po in &fairness {
            put_u(w, m(aig.po_fanin(po)).raw() as u64)?;
        }
        put_u(w, 0)?;
    }

    let constraints: Vec<PoId> = aig.po_ids_of_type(PoType::Constraint).collect();
    put_u(w, constraints.len() as u64)?;
    for &po in &constraints {
        put_u(w, (m(aig.po_fanin(po)).raw() as u64) ^ 1)?;
    }

    Ok(())
}

/// Reads an AIG previously written by [`marshal`].
///
/// OUTPUT-only inputs (no explicit BAD_STATES/JUSTICE) come back with their
/// bad-states section restored as BAD_STATES POs, per the step-5 promotion
/// rule applied at marshal time: the original OUTPUT/BAD_STATES distinction
/// is not recoverable in that case.
pub fn unmarshal(r: &mut impl Read) -> Result<Aig> {
    let n_pis = get_u(r)? as usize;
    let n_latches = get_u(r)? as usize;
    let n_ands = get_u(r)? as usize;

    let mut aig = Aig::new();
    // table[0] is the constant-false placeholder; table[1] is unused, kept
    // so `table[id]` lines up with the destination numbering used by `marshal`.
    let mut table: Vec<Literal> = vec![Literal::FALSE, Literal::FALSE];

    let resolve = |table: &[Literal], raw: u64| -> Literal {
        let id = (raw >> 1) as usize;
        let base = table[id];
        base.negate_if(raw & 1 != 0)
    };

    for _ in 0..n_pis {
        table.push(aig.create_pi(None));
    }

    let mut latch_lits: Vec<Literal> = Vec::with_capacity(n_latches);
    for _ in 0..n_latches {
        let lit = aig.create_latch(LatchInit::Zero, None, None);
        latch_lits.push(lit);
        table.push(lit);
    }

    for _ in 0..n_ands {
        let right_shifted = get_u(r)?;
        let left_raw = get_u(r)?;
        let right_raw = right_shifted >> 1;
        let l = resolve(&table, left_raw);
        let rr = resolve(&table, right_raw);
        let lit = aig.create_and(l, rr);
        table.push(lit);
    }

    for &latch in &latch_lits {
        let value = get_u(r)?;
        let init_code = value & 0b11;
        let next_raw = value >> 2;
        let init = match init_code {
            NONDET => LatchInit::Nondet,
            ZERO => LatchInit::Zero,
            ONE => LatchInit::One,
            other => return Err(AigError::malformed(format!("unknown marshal latch init code {}", other))),
        };
        let next = resolve(&table, next_raw);
        aig.set_init(latch, init);
        aig.set_next(latch, next);
    }

    let n_bad = get_u(r)? as usize;
    for _ in 0..n_bad {
        let raw = get_u(r)? ^ 1;
        let fanin = resolve(&table, raw);
        aig.create_po(fanin, PoType::BadStates, None);
    }

    let version = get_u(r)?;
    if version != 1 {
        return Err(AigError::malformed(format!(
            "unsupported marshal fairness-section version {}",
            version
        )));
    }
    let n_fairness = get_u(r)? as usize;
    let total_sentinel = get_u(r)? as usize;

    let mut fairness_pos: Option<Vec<PoId>> = None;
    let mut consumed = 0usize;
    while consumed < total_sentinel {
        let mut words: Vec<u64> = Vec::new();
        loop {
            let word = get_u(r)?;
            consumed += 1;
            if word == 0 {
                break;
            }
            words.push(word);
        }
        let split = words.len() - n_fairness;
        let justice_words = &words[..split];
        let fairness_words = &words[split..];

        let mut group_ids = Vec::with_capacity(justice_words.len());
        for &raw in justice_words {
            let fanin = resolve(&table, raw);
            group_ids.push(aig.create_po(fanin, PoType::Justice, None));
        }
        aig.create_justice(group_ids);

        if fairness_pos.is_none() {
            let mut ids = Vec::with_capacity(fairness_words.len());
            for &raw in fairness_words {
                let fanin = resolve(&table, raw);
                ids.push(aig.create_po(fanin, PoType::Fairness, None));
            }
            fairness_pos = Some(ids);
        }
    }

    let n_constraints = get_u(r)? as usize;
    for _ in 0..n_constraints {
        let raw = get_u(r)? ^ 1;
        let fanin = resolve(&table, raw);
        aig.create_po(fanin, PoType::Constraint, None);
    }

    Ok(aig)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_combinational_circuit() {
        let mut aig = Aig::new();
        let a = aig.create_pi(None);
        let b = aig.create_pi(None);
        let g = aig.create_and(a, b);
        aig.create_po(g, PoType::BadStates, None);

        let mut bytes = Vec::new();
        marshal(&aig, &mut bytes).unwrap();
        let mut cursor = std::io::Cursor::new(bytes);
        let back = unmarshal(&mut cursor).unwrap();

        assert_eq!(back.n_pis(), 2);
        assert_eq!(back.n_ands(), 1);
        assert_eq!(back.po_ids_of_type(PoType::BadStates).count(), 1);
    }

    #[test]
    fn round_trips_latches() {
        let mut aig = Aig::new();
        let l = aig.create_latch(LatchInit::One, None, None);
        aig.set_next(l, l.negate());
        aig.create_po(l, PoType::BadStates, None);

        let mut bytes = Vec::new();
        marshal(&aig, &mut bytes).unwrap();
        let mut cursor = std::io::Cursor::new(bytes);
        let back = unmarshal(&mut cursor).unwrap();

        let latch = back.latches().next().unwrap();
        assert_eq!(back.latch_init(latch), LatchInit::One);
        assert_eq!(back.latch_next(latch), Some(latch.negate()));
    }

    #[test]
    fn output_only_inputs_come_back_as_bad_states() {
        let mut aig = Aig::new();
        let a = aig.create_pi(None);
        aig.create_po(a, PoType::Output, None);

        let mut bytes = Vec::new();
        marshal(&aig, &mut bytes).unwrap();
        let mut cursor = std::io::Cursor::new(bytes);
        let back = unmarshal(&mut cursor).unwrap();

        assert_eq!(back.po_ids_of_type(PoType::Output).count(), 0);
        assert_eq!(back.po_ids_of_type(PoType::BadStates).count(), 1);
    }

    #[test]
    fn round_trips_justice_and_fairness_groups() {
        let mut aig = Aig::new();
        let a = aig.create_pi(None);
        let b = aig.create_pi(None);
        let j1 = aig.create_po(a, PoType::Justice, None);
        let j2 = aig.create_po(a.negate(), PoType::Justice, None);
        aig.create_justice(vec![j1, j2]);
        let j3 = aig.create_po(b, PoType::Justice, None);
        aig.create_justice(vec![j3]);
        aig.create_po(b.negate(), PoType::Fairness, None);

        let mut bytes = Vec::new();
        marshal(&aig, &mut bytes).unwrap();
        let mut cursor = std::io::Cursor::new(bytes);
        let back = unmarshal(&mut cursor).unwrap();

        assert_eq!(back.n_justice(), 2);
        assert_eq!(back.justice_group(0).len(), 2);
        assert_eq!(back.justice_group(1).len(), 1);
        assert_eq!(back.po_ids_of_type(PoType::Fairness).count(), 1);
    }

    #[test]
    fn rejects_unresolved_buffers() {
        let mut aig = Aig::new();
        let a = aig.create_pi(None);
        let buf = aig.create_buffer(a, None);
        aig.create_po(buf, PoType::Output, None);
        let mut out = Vec::new();
        assert!(marshal(&aig, &mut out).is_err());
    }
}
