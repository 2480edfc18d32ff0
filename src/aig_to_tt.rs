//! Evaluating a purely combinational [`Aig`] as truth tables.
//!
//! Both entry points require an AIG with no latches and no buffers; they
//! return [`AigError::NotSupported`] rather than panicking, since whether an
//! AIG is combinational is a property the caller can check or fix (e.g. by
//! calling [`Aig::clean`]) before retrying.

use std::collections::{HashMap, HashSet};

use crate::aig::Aig;
use crate::error::{AigError, Result};
use crate::literal::Literal;
use crate::truth_table::{TruthTable, TruthTableUniverse};
use std::rc::Rc;

fn require_combinational(aig: &Aig) -> Result<()> {
    if aig.n_latches() > 0 || aig.n_buffers() > 0 {
        return Err(AigError::not_supported(
            "aig_to_tt: AIG has latches or buffers, it is not purely combinational",
        ));
    }
    Ok(())
}

/// Evaluates every PO of a combinational `aig` as a truth table over its PIs.
///
/// Returns the shared universe (width `n_pis`) and the truth table of each
/// PO's fanin, in PO construction order, paired up consecutively (PO 0 with
/// PO 1, PO 2 with PO 3, ...) as a caller convenience; this pairing carries
/// no meaning inside the core evaluator itself.
pub fn aig_to_tt(aig: &Aig) -> Result<(Rc<TruthTableUniverse>, Vec<(TruthTable, TruthTable)>)> {
    require_combinational(aig)?;

    let universe = TruthTableUniverse::new(aig.n_pis());
    let mut value: HashMap<Literal, TruthTable> = HashMap::new();
    value.insert(Literal::FALSE, universe.constant(false));
    for (i, pi) in aig.pis().enumerate() {
        value.insert(pi, universe.var(i));
    }

    for f in aig.and_gates() {
        let (l, r) = aig.and_fanins(f);
        let tl = lookup(&value, l);
        let tr = lookup(&value, r);
        value.insert(f, &tl & &tr);
    }

    let po_values: Vec<TruthTable> = aig
        .po_ids()
        .map(|po| lookup(&value, aig.po_fanin(po)))
        .collect();

    let mut pairs = Vec::with_capacity(po_values.len() / 2);
    let mut it = po_values.into_iter();
    while let (Some(a), Some(b)) = (it.next(), it.next()) {
        pairs.push((a, b));
    }

    Ok((universe, pairs))
}

fn lookup(value: &HashMap<Literal, TruthTable>, f: Literal) -> TruthTable {
    value
        .get(&f.positive())
        .unwrap_or_else(|| panic!("aig_to_tt: literal {} evaluated before its fanin", f))
        .negate_if(f.is_negated())
}

/// Evaluates the truth table of `root` with respect to an ordered cut of
/// size `>= universe.n()`: the cut's last `n` members become `var(0..n-1)`
/// in the order given, earlier members are forced to constant-0, and
/// everything between the cut and `root` is folded in by an iterative,
/// memoized post-order walk (no native recursion, so depth is bounded only
/// by available memory, not call-stack size).
pub fn aig_cut_to_tt(
    universe: &Rc<TruthTableUniverse>,
    aig: &Aig,
    root: Literal,
    cut: &[Literal],
) -> Result<TruthTable> {
    require_combinational(aig)?;

    let n = universe.n();
    assert!(cut.len() >= n, "aig_cut_to_tt: cut is smaller than the universe's variable count");

    let mut memo: HashMap<Literal, TruthTable> = HashMap::new();
    memo.insert(Literal::FALSE, universe.constant(false));

    let boundary_start = cut.len() - n;
    for (i, &c) in cut.iter().enumerate() {
        let value = if i < boundary_start {
            universe.constant(false)
        } else {
            universe.var(i - boundary_start)
        };
        memo.insert(c.positive(), value);
    }

    let mut stack: Vec<Literal> = vec![root.positive()];
    let mut on_stack: HashSet<Literal> = HashSet::new();
    while let Some(&f) = stack.last() {
        if memo.contains_key(&f) {
            stack.pop();
            continue;
        }
        let (l, r) = aig.and_fanins(f);
        let lp = l.positive();
        let rp = r.positive();
        let l_ready = memo.contains_key(&lp);
        let r_ready = memo.contains_key(&rp);
        if l_ready && r_ready {
            let tl = memo[&lp].negate_if(l.is_negated());
            let tr = memo[&rp].negate_if(r.is_negated());
            memo.insert(f, &tl & &tr);
            stack.pop();
            on_stack.remove(&f);
        } else {
            on_stack.insert(f);
            if !l_ready {
                stack.push(lp);
            }
            if !r_ready {
                stack.push(rp);
            }
        }
    }

    Ok(memo[&root.positive()].negate_if(root.is_negated()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aig::PoType;

    #[test]
    fn aig_to_tt_evaluates_and_gate() {
        let mut aig = Aig::new();
        let a = aig.create_pi(None);
        let b = aig.create_pi(None);
        let g = aig.create_and(a, b);
        aig.create_po(g, PoType::Output, None);
        aig.create_po(g.negate(), PoType::Output, None);

        let (universe, pairs) = aig_to_tt(&aig).unwrap();
        assert_eq!(universe.n(), 2);
        assert_eq!(pairs.len(), 1);
        let (tt, tt_neg) = &pairs[0];
        let expected = &universe.var(0) & &universe.var(1);
        assert_eq!(*tt, expected);
        assert_eq!(*tt_neg, &!&universe.var(0) | &!&universe.var(1));
    }

    #[test]
    fn aig_to_tt_rejects_sequential_aig() {
        let mut aig = Aig::new();
        let l = aig.create_latch(crate::node::LatchInit::Zero, None, None);
        aig.set_next(l, l);
        assert!(aig_to_tt(&aig).is_err());
    }

    #[test]
    fn aig_cut_to_tt_matches_full_evaluation() {
        let mut aig = Aig::new();
        let a = aig.create_pi(None);
        let b = aig.create_pi(None);
        let c = aig.create_pi(None);
        let ab = aig.create_and(a, b);
        let root = aig.create_and(ab, c);

        let universe = TruthTableUniverse::new(3);
        let cut = [a, b, c];
        let tt = aig_cut_to_tt(&universe, &aig, root, &cut).unwrap();
        let expected = &(&universe.var(0) & &universe.var(1)) & &universe.var(2);
        assert_eq!(tt, expected);
    }

    #[test]
    fn aig_cut_to_tt_treats_cut_members_as_opaque() {
        let mut aig = Aig::new();
        let a = aig.create_pi(None);
        let b = aig.create_pi(None);
        let ab = aig.create_and(a, b);

        let universe = TruthTableUniverse::new(1);
        let cut = [ab];
        let tt = aig_cut_to_tt(&universe, &aig, ab, &cut).unwrap();
        assert_eq!(tt, universe.var(0));
    }
}
