use std::collections::HashMap;
use std::io::BufRead;

use log::{debug, warn};

use crate::aig::{Aig, PoId, PoType};
use crate::error::{AigError, Result};
use crate::literal::Literal;
use crate::node::LatchInit;

use super::get_u;

fn read_line(r: &mut impl BufRead, offset: &mut usize) -> Result<String> {
    let mut line = String::new();
    let n = r
        .read_line(&mut line)
        .map_err(AigError::from)?;
    if n == 0 {
        return Err(AigError::malformed_at("unexpected end of file", *offset));
    }
    *offset += n;
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(line)
}

fn parse_u64(tok: &str, offset: usize) -> Result<u64> {
    tok.parse()
        .map_err(|_| AigError::malformed_at(format!("expected integer, found `{}`", tok), offset))
}

fn parse_usize(tok: &str, offset: usize) -> Result<usize> {
    tok.parse()
        .map_err(|_| AigError::malformed_at(format!("expected integer, found `{}`", tok), offset))
}

/// Reads an AIG from its binary AIGER encoding.
pub fn read(r: &mut impl BufRead) -> Result<Aig> {
    let mut offset = 0usize;
    let header = read_line(r, &mut offset)?;
    let mut fields = header.split_whitespace();
    if fields.next() != Some("aig") {
        return Err(AigError::malformed_at("missing `aig` header tag", 0));
    }
    fn field(fields: &mut std::str::SplitWhitespace, name: &str, offset: usize) -> Result<usize> {
        let tok = fields
            .next()
            .ok_or_else(|| AigError::malformed_at(format!("missing header field `{}`", name), offset))?;
        parse_usize(tok, offset)
    }
    let _m = field(&mut fields, "M", offset)?;
    let n_i = field(&mut fields, "I", offset)?;
    let n_l = field(&mut fields, "L", offset)?;
    let n_o = field(&mut fields, "O", offset)?;
    let n_a = field(&mut fields, "A", offset)?;
    let n_b = fields.next().map(|t| parse_usize(t, offset)).transpose()?.unwrap_or(0);
    let n_c = fields.next().map(|t| parse_usize(t, offset)).transpose()?.unwrap_or(0);
    let n_j = fields.next().map(|t| parse_usize(t, offset)).transpose()?.unwrap_or(0);
    let n_f = fields.next().map(|t| parse_usize(t, offset)).transpose()?.unwrap_or(0);
    debug!(
        "aiger header: M={} I={} L={} O={} A={} B={} C={} J={} F={}",
        _m, n_i, n_l, n_o, n_a, n_b, n_c, n_j, n_f
    );

    let mut aig = Aig::new();
    let mut id_to_lit: HashMap<u32, Literal> = HashMap::new();

    for k in 1..=n_i {
        let lit = aig.create_pi(None);
        id_to_lit.insert(k as u32, lit);
    }

    let mut pending_latches: Vec<(u64, LatchInit)> = Vec::with_capacity(n_l);
    for k in 0..n_l {
        let line = read_line(r, &mut offset)?;
        let mut tokens = line.split_whitespace();
        let next_tok = tokens
            .next()
            .ok_or_else(|| AigError::malformed_at("empty latch line", offset))?;
        let next_raw = parse_u64(next_tok, offset)?;
        let init = match tokens.next() {
            None => LatchInit::Zero,
            Some("0") => LatchInit::Zero,
            Some("1") => LatchInit::One,
            Some(_) => LatchInit::Nondet,
        };
        pending_latches.push((next_raw, init));
        let lit = aig.create_latch(init, None, None);
        id_to_lit.insert((n_i + 1 + k) as u32, lit);
    }

    let mut po_specs: Vec<(u64, PoType)> = Vec::new();
    for _ in 0..n_o {
        let line = read_line(r, &mut offset)?;
        po_specs.push((parse_u64(line.trim(), offset)?, PoType::Output));
    }
    for _ in 0..n_b {
        let line = read_line(r, &mut offset)?;
        po_specs.push((parse_u64(line.trim(), offset)?, PoType::BadStates));
    }
    for _ in 0..n_c {
        let line = read_line(r, &mut offset)?;
        po_specs.push((parse_u64(line.trim(), offset)?, PoType::Constraint));
    }

    let mut group_sizes: Vec<usize> = Vec::with_capacity(n_j);
    for _ in 0..n_j {
        let line = read_line(r, &mut offset)?;
        group_sizes.push(parse_usize(line.trim(), offset)?);
    }
    let total_justice: usize = group_sizes.iter().sum();
    for _ in 0..total_justice {
        let line = read_line(r, &mut offset)?;
        po_specs.push((parse_u64(line.trim(), offset)?, PoType::Justice));
    }

    for _ in 0..n_f {
        let line = read_line(r, &mut offset)?;
        po_specs.push((parse_u64(line.trim(), offset)?, PoType::Fairness));
    }

    let lit_of = |raw: u64, id_to_lit: &HashMap<u32, Literal>, offset: usize| -> Result<Literal> {
        let id = (raw >> 1) as u32;
        let base = if id == 0 {
            Literal::FALSE
        } else {
            *id_to_lit
                .get(&id)
                .ok_or_else(|| AigError::malformed_at(format!("literal refers to undefined node {}", id), offset))?
        };
        Ok(base.negate_if(raw & 1 != 0))
    };

    for g in 0..n_a {
        let lhs_id = (n_i + n_l + 1 + g) as u32;
        let delta1 = get_u(r).map_err(AigError::from)?;
        let delta2 = get_u(r).map_err(AigError::from)?;
        let own_raw = (lhs_id as u64) << 1;
        let rhs0_raw = own_raw
            .checked_sub(delta1)
            .ok_or_else(|| AigError::malformed_at("AND gate delta underflow", offset))?;
        let rhs1_raw = rhs0_raw
            .checked_sub(delta2)
            .ok_or_else(|| AigError::malformed_at("AND gate delta underflow", offset))?;
        let l = lit_of(rhs0_raw, &id_to_lit, offset)?;
        let rr = lit_of(rhs1_raw, &id_to_lit, offset)?;
        let lit = aig.create_and(l, rr);
        id_to_lit.insert(lhs_id, lit);
    }

    for (k, (next_raw, _init)) in pending_latches.into_iter().enumerate() {
        let latch_lit = *id_to_lit.get(&((n_i + 1 + k) as u32)).unwrap();
        let next_lit = lit_of(next_raw, &id_to_lit, offset)?;
        aig.set_next(latch_lit, next_lit);
    }

    let mut justice_po_ids: Vec<PoId> = Vec::with_capacity(total_justice);
    for (raw, ty) in po_specs {
        let fanin = lit_of(raw, &id_to_lit, offset)?;
        let po = aig.create_po(fanin, ty, None);
        if ty == PoType::Justice {
            justice_po_ids.push(po);
        }
    }
    let mut off = 0;
    for size in group_sizes {
        let group = justice_po_ids[off..off + size].to_vec();
        aig.create_justice(group);
        off += size;
    }

    read_symbol_table(r, &mut aig, &mut offset)?;

    Ok(aig)
}

fn read_symbol_table(r: &mut impl BufRead, aig: &mut Aig, offset: &mut usize) -> Result<()> {
    let pis: Vec<Literal> = aig.pis().collect();
    let latches: Vec<Literal> = aig.latches().collect();
    let outputs: Vec<PoId> = aig.po_ids_of_type(PoType::Output).collect();
    let bad: Vec<PoId> = aig.po_ids_of_type(PoType::BadStates).collect();
    let constraints: Vec<PoId> = aig.po_ids_of_type(PoType::Constraint).collect();
    let fairness: Vec<PoId> = aig.po_ids_of_type(PoType::Fairness).collect();
    let justice_groups: Vec<Vec<usize>> = aig.justice_groups().map(|g| g.to_vec()).collect();

    loop {
        let mut line = String::new();
        let n = r.read_line(&mut line).map_err(AigError::from)?;
        if n == 0 {
            break;
        }
        *offset += n;
        let line = line.trim_end_matches(['\n', '\r']);
        if line.is_empty() {
            continue;
        }
        if line == "c" {
            break;
        }
        let mut chars = line.chars();
        let prefix = chars.next().unwrap();
        let rest: String = chars.collect();
        let mut parts = rest.splitn(2, ' ');
        let idx_tok = parts.next().unwrap_or("");
        let name = parts.next();
        let idx: usize = match idx_tok.parse() {
            Ok(v) => v,
            Err(_) => return Err(AigError::malformed_at(format!("malformed symbol line `{}`", line), *offset)),
        };
        let name = match name {
            Some(n) => n,
            None => return Err(AigError::malformed_at(format!("symbol line missing name: `{}`", line), *offset)),
        };
        match prefix {
            'i' => set_node_name(&mut aig, *pis.get(idx).ok_or_else(|| bad_index(*offset))?, name),
            'l' => set_node_name(&mut aig, *latches.get(idx).ok_or_else(|| bad_index(*offset))?, name),
            'o' => set_po_name_tolerant(&mut aig, *outputs.get(idx).ok_or_else(|| bad_index(*offset))?, name),
            'b' => set_po_name_tolerant(&mut aig, *bad.get(idx).ok_or_else(|| bad_index(*offset))?, name),
            'c' => set_po_name_tolerant(&mut aig, *constraints.get(idx).ok_or_else(|| bad_index(*offset))?, name),
            'j' => {
                let group = justice_groups.get(idx).ok_or_else(|| bad_index(*offset))?;
                let first_po = *group.first().ok_or_else(|| bad_index(*offset))?;
                set_po_name_tolerant(&mut aig, first_po, name)
            }
            'f' => set_po_name_tolerant(&mut aig, *fairness.get(idx).ok_or_else(|| bad_index(*offset))?, name),
            _ => return Err(AigError::malformed_at(format!("unknown symbol prefix `{}`", prefix), *offset)),
        }
    }
    Ok(())
}

/// Binds `name` to `f`, silently keeping the first binding on a collision
/// (a repeated symbol-table line for the same node, or a name already used
/// elsewhere) per the AIGER reader's "first wins" rule.
fn set_node_name(aig: &mut Aig, f: Literal, name: &str) {
    if aig.has_name(f) || aig.get_by_name(name).is_some() {
        warn!("aiger symbol table: ignoring duplicate name `{}`", name);
        return;
    }
    aig.set_name(f, name);
}

fn set_po_name_tolerant(aig: &mut Aig, po: PoId, name: &str) {
    if aig.po_name_of(po).is_some() || aig.po_by_name(name).is_some() {
        warn!("aiger symbol table: ignoring duplicate name `{}`", name);
        return;
    }
    aig.set_po_name(po, name);
}

fn bad_index(offset: usize) -> AigError {
    AigError::malformed_at("symbol table index out of range", offset)
}
