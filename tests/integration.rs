//! Black-box coverage of the public `aig` API: strashing, codec round-trips,
//! truth-table evaluation and simulation, exercised from outside the crate.

use std::io::Cursor;

use aig::node::LatchInit;
use aig::{aig::PoType, aig_to_tt, aiger, cnf, simulator, truth_table::TruthTableUniverse, Aig};

// S1 — a self-AND folds to its own input, leaving no AND gates behind.
#[test]
fn minimal_aig_round_trip_folds_self_and() {
    let mut g = Aig::new();
    let a = g.create_pi(Some("a"));
    let g_and = g.create_and(a, a);
    g.create_po(g_and, PoType::Output, None);

    assert_eq!(g.n_ands(), 0);
    assert_eq!(g.po_fanin(g.po_ids().next().unwrap()), a);
}

// S2 — structural hashing is commutative in its fanin pair.
#[test]
fn strashing_deduplicates_commuted_fanins() {
    let mut g = Aig::new();
    let a = g.create_pi(None);
    let b = g.create_pi(None);
    let ab = g.create_and(a, b);
    let ba = g.create_and(b, a);

    assert_eq!(ab, ba);
    assert_eq!(g.n_ands(), 1);
}

// S3 — binary AIGER round-trips bit-exactly for a single-latch AIG.
#[test]
fn aiger_round_trip_with_a_latch_is_byte_stable() {
    let mut g = Aig::new();
    let x = g.create_pi(Some("x"));
    let l = g.create_latch(LatchInit::Zero, None, Some("l"));
    let xor = g.create_xor(x, l);
    g.set_next(l, xor.negate());
    g.create_po(l, PoType::Output, Some("o"));

    let mut first = Vec::new();
    aiger::write(&g, &mut first).unwrap();

    let read_back = aiger::read(&mut Cursor::new(&first)).unwrap();

    let mut second = Vec::new();
    aiger::write(&read_back, &mut second).unwrap();

    assert_eq!(first, second);
}

// S4 — header suffix and PO section order for a justice/fairness-bearing AIG.
#[test]
fn justice_and_fairness_pos_appear_in_header_and_section_order() {
    let mut g = Aig::new();
    let _a = g.create_pi(None);
    let _b = g.create_pi(None);
    let _c = g.create_pi(None);
    let l = g.create_latch(LatchInit::Nondet, None, None);
    g.set_next(l, l);

    let mut justice_pos = Vec::new();
    for _ in 0..5 {
        justice_pos.push(g.create_po(l, PoType::Justice, None));
    }
    g.create_justice(justice_pos);
    g.create_po(l, PoType::Fairness, None);

    let mut bytes = Vec::new();
    aiger::write(&g, &mut bytes).unwrap();
    let text = String::from_utf8(bytes.clone()).unwrap();
    let header = text.lines().next().unwrap();
    let fields: Vec<&str> = header.split_whitespace().collect();
    // aig M I L O A B C J F
    assert_eq!(fields[0], "aig");
    assert_eq!(fields.len(), 9);
    assert_eq!(fields[7], "5"); // J
    assert_eq!(fields[8], "1"); // F

    let read_back = aiger::read(&mut Cursor::new(&bytes)).unwrap();
    assert_eq!(read_back.n_justice(), 1);
    assert_eq!(read_back.justice_group(0).len(), 5);
    assert_eq!(read_back.po_ids_of_type(PoType::Fairness).count(), 1);
}

// S5 — ISOP of the two-variable XOR.
#[test]
fn isop_of_xor_recovers_two_cubes() {
    let universe = TruthTableUniverse::new(2);
    let xor = universe.xor_fold([universe.var(0), universe.var(1)]);

    assert_eq!(xor.sop(), "x0&~x1 + ~x0&x1");

    let cubes = xor.isop();
    assert_eq!(cubes.len(), 2);
    let has = |lits: &[i32]| cubes.iter().any(|c| c.iter().copied().eq(lits.iter().copied()));
    assert!(has(&[-2, 1]));
    assert!(has(&[-1, 2]));
}

// S6 — a width-3 enabled counter driven by a CEX witness trace.
#[test]
fn simulator_replays_counter_example_witness() {
    let mut g = Aig::new();
    let enable = g.create_pi(Some("enable"));
    let mut latches = Vec::new();
    for _ in 0..3 {
        latches.push(g.create_latch(LatchInit::Zero, None, None));
    }
    let mut carry = enable;
    for &latch in &latches {
        let toggled = g.create_xor(latch, carry);
        g.set_next(latch, toggled);
        carry = g.create_and(latch, carry);
    }
    for &latch in &latches {
        g.create_po(latch, PoType::Output, None);
    }

    let witness_text = "0\n1\n000\n1\n1\n1\n1\n1\n1\n1\n1\n.\n";
    let witness = simulator::read_cex(&mut Cursor::new(witness_text.as_bytes())).unwrap();
    assert_eq!(witness.init_latches, vec![false, false, false]);
    assert_eq!(witness.pi_frames.len(), 8);

    let frames = simulator::simulate(&g, &witness.init_latches, &witness.pi_frames);
    let read_bit = |i: usize| -> Vec<bool> { frames.iter().map(|f| f.get(latches[i])).collect() };

    assert_eq!(read_bit(0), vec![true, false, true, false, true, false, true, false]);
    assert_eq!(read_bit(1), vec![false, false, true, true, false, false, true, true]);
    assert_eq!(read_bit(2), vec![false, false, false, false, true, true, true, true]);
}

// Invariant 6 — marshal round-trip preserves structure, and promotes
// OUTPUT-only inputs to BAD_STATES.
#[test]
fn marshal_round_trip_promotes_outputs_to_bad_states() {
    let mut g = Aig::new();
    let a = g.create_pi(None);
    let b = g.create_pi(None);
    let and = g.create_and(a, b);
    g.create_po(and, PoType::Output, None);

    let mut bytes = Vec::new();
    aiger::marshal(&g, &mut bytes).unwrap();
    let back = aiger::unmarshal(&mut Cursor::new(&bytes)).unwrap();

    assert_eq!(back.n_pis(), 2);
    assert_eq!(back.n_ands(), 1);
    assert_eq!(back.po_ids_of_type(PoType::BadStates).count(), 1);
    assert_eq!(back.po_ids_of_type(PoType::Output).count(), 0);
}

// Invariant 4 — `clean` preserves truth tables of the POs it keeps, and
// drops unreachable PIs/gates.
#[test]
fn clean_preserves_truth_tables_of_surviving_pos() {
    let mut g = Aig::new();
    let a = g.create_pi(None);
    let b = g.create_pi(None);
    let and = g.create_and(a, b);
    let dead = g.create_pi(None);
    let _unused = g.create_and(dead, dead.negate());
    g.create_po(and, PoType::Output, None);
    g.create_po(and.negate(), PoType::Output, None);

    let cleaned = g.clean(None);
    assert_eq!(cleaned.n_pis(), 2);

    let (universe_before, pairs_before) = aig_to_tt::aig_to_tt(&g).unwrap();
    let (universe_after, pairs_after) = aig_to_tt::aig_to_tt(&cleaned).unwrap();
    assert_eq!(universe_before.n(), universe_after.n());
    assert_eq!(pairs_before.len(), pairs_after.len());
    assert_eq!(pairs_before[0].0, pairs_after[0].0);
}

// Universal invariant 2 — negate_if is its own inverse under the same flag.
#[test]
fn negate_if_is_self_inverse() {
    let mut g = Aig::new();
    let a = g.create_pi(None);
    for &cond in &[false, true] {
        assert_eq!(a.negate_if(cond).negate_if(cond), a);
    }
}

// Universal invariant 7 — Shannon expansion recomposes the original table.
#[test]
fn cofactor_shannon_expansion_recomposes_original() {
    let universe = TruthTableUniverse::new(3);
    let f = &(&universe.var(0) & &universe.var(1)) | &universe.var(2);

    for v in 0..3 {
        let (hi, lo) = f.cofactors(v);
        let recomposed = &(&hi & &universe.var(v)) | &(&lo & &!&universe.var(v));
        assert_eq!(recomposed, f);
    }
}

// DIMACS CNF emitter: header arithmetic matches the produced clause count.
#[test]
fn cnf_emitter_header_matches_body() {
    let mut g = Aig::new();
    let a = g.create_pi(None);
    let b = g.create_pi(None);
    let and = g.create_and(a, b);
    g.create_po(and, PoType::Output, None);

    let mut out = Vec::new();
    cnf::write_cnf(&g, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let mut lines = text.lines();
    let header = lines.next().unwrap();
    let fields: Vec<&str> = header.split_whitespace().collect();
    let n_clauses: usize = fields[3].parse().unwrap();
    assert_eq!(lines.count(), n_clauses);
}
