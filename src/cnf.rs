//! Tseitin encoding of a combinational [`Aig`] to DIMACS CNF.
//!
//! This is an ambient convenience for feeding an AIG to an external SAT
//! solver, not part of the core graph/codec surface; it follows the same
//! "reject unresolved buffers" contract as the AIGER writer and the marshal
//! codec.

use std::collections::HashMap;
use std::io::Write;

use crate::aig::Aig;
use crate::error::{AigError, Result};
use crate::literal::Literal;

fn dimacs_lit(var: u32, f: Literal) -> i64 {
    let v = var as i64;
    if f.is_negated() {
        -v
    } else {
        v
    }
}

/// Writes `aig` as a DIMACS CNF problem.
///
/// Variable 1 is pinned to constant-false via the unit clause `-1 0`. Every
/// PI and latch gets its own variable; every AND gate `x = y & z` is Tseitin
/// encoded as the three clauses `(-x y), (-x z), (x -y -z)`; every PO fanin
/// is asserted true with a unit clause. `aig` must have no latches left
/// unresolved as buffers (buffers are rejected outright, same as
/// [`crate::aiger::write`]).
pub fn write_cnf(aig: &Aig, w: &mut impl Write) -> Result<()> {
    if aig.buffers().next().is_some() {
        return Err(AigError::not_supported(
            "cannot write CNF: AIG still has unresolved buffers",
        ));
    }

    let mut var: HashMap<Literal, u32> = HashMap::new();
    var.insert(Literal::FALSE, 1);
    let mut next = 2u32;
    for f in aig.pis() {
        var.insert(f, next);
        next += 1;
    }
    for f in aig.latches() {
        var.insert(f, next);
        next += 1;
    }
    for f in aig.and_gates() {
        var.insert(f, next);
        next += 1;
    }

    let lookup = |f: Literal| -> i64 {
        let v = *var.get(&f.positive()).expect("literal not numbered");
        dimacs_lit(v, f)
    };

    let n_vars = next - 1;
    let n_clauses = 1 + aig.n_pos() + 3 * aig.n_ands();
    writeln!(w, "p cnf {} {}", n_vars, n_clauses)?;
    writeln!(w, "-1 0")?;

    for f in aig.and_gates() {
        let (l, r) = aig.and_fanins(f);
        let x = lookup(f);
        let y = lookup(l);
        let z = lookup(r);
        writeln!(w, "{} {} 0", -x, y)?;
        writeln!(w, "{} {} 0", -x, z)?;
        writeln!(w, "{} {} {} 0", x, -y, -z)?;
    }

    for po in aig.po_ids() {
        writeln!(w, "{} 0", lookup(aig.po_fanin(po)))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aig::PoType;

    #[test]
    fn rejects_unresolved_buffers() {
        let mut aig = Aig::new();
        let a = aig.create_pi(None);
        let buf = aig.create_buffer(a, None);
        aig.create_po(buf, PoType::Output, None);
        let mut out = Vec::new();
        assert!(write_cnf(&aig, &mut out).is_err());
    }

    #[test]
    fn header_matches_clause_count() {
        let mut aig = Aig::new();
        let a = aig.create_pi(None);
        let b = aig.create_pi(None);
        let g = aig.create_and(a, b);
        aig.create_po(g, PoType::Output, None);
        aig.create_po(g.negate(), PoType::Output, None);

        let mut out = Vec::new();
        write_cnf(&aig, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let header = text.lines().next().unwrap();
        // 1 (const) + 2 pis + 1 and = 4 vars; 1 + 2 pos + 3*1 ands = 6 clauses
        assert_eq!(header, "p cnf 4 6");
        assert_eq!(text.lines().count(), 7);
    }

    #[test]
    fn unit_clause_pins_false_variable() {
        let aig = Aig::new();
        let mut out = Vec::new();
        write_cnf(&aig, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.lines().any(|l| l == "-1 0"));
    }
}
