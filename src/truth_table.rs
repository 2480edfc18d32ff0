//! Bit-packed truth tables over a shared variable universe.
//!
//! A [`TruthTableUniverse`] fixes the number of variables `N` and caches the
//! `2^N`-bit cofactor masks used by every table built from it; a
//! [`TruthTable`] is a `2^N`-bit bignum mask plus a handle back to its
//! universe. Tables from different universes must never be combined, so
//! every binary operation asserts the two operands share a universe (by
//! `Rc` pointer identity, asserting shared context rather than threading a
//! lifetime parameter through).

use std::collections::BTreeSet;
use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, Not};
use std::rc::Rc;

use num_bigint::BigUint;
use num_traits::{One, Zero};

/// The shared context for a family of truth tables over the same `N`
/// variables: bit width and per-variable cofactor masks.
#[derive(Debug)]
pub struct TruthTableUniverse {
    n: usize,
    nbits: usize,
    mask: BigUint,
    /// `cofactor_masks[c][v]` selects the sub-cube where variable `v` equals `c`.
    cofactor_masks: [Vec<BigUint>; 2],
}

impl TruthTableUniverse {
    /// Creates a new universe over `n` Boolean variables (`2^n`-bit tables).
    pub fn new(n: usize) -> Rc<Self> {
        let nbits = 1usize << n;
        let mask = (BigUint::one() << nbits) - BigUint::one();

        let mut masks0 = Vec::with_capacity(n);
        let mut masks1 = Vec::with_capacity(n);
        for v in 0..n {
            let bits = 1usize << v;
            let mut res = (BigUint::one() << bits) - BigUint::one();
            let mut mask_bits = bits << 1;
            for _ in 0..(n - (v + 1)) {
                let shifted = &res << mask_bits;
                res |= shifted;
                mask_bits <<= 1;
            }
            masks1.push(&res << bits);
            masks0.push(res);
        }

        Rc::new(Self {
            n,
            nbits,
            mask,
            cofactor_masks: [masks0, masks1],
        })
    }

    /// The number of variables this universe was built for.
    pub fn n(&self) -> usize {
        self.n
    }

    /// The constant-false or constant-true table over this universe.
    pub fn constant(self: &Rc<Self>, value: bool) -> TruthTable {
        let bits = if value {
            self.mask.clone()
        } else {
            BigUint::zero()
        };
        TruthTable {
            universe: Rc::clone(self),
            bits,
        }
    }

    /// The table for variable `i` (positive polarity if `positive`).
    pub fn var(self: &Rc<Self>, i: usize) -> TruthTable {
        self.var_with_polarity(i, true)
    }

    /// The table for variable `i`, negated if `positive` is `false`.
    pub fn var_with_polarity(self: &Rc<Self>, i: usize, positive: bool) -> TruthTable {
        TruthTable {
            universe: Rc::clone(self),
            bits: self.cofactor_masks[positive as usize][i].clone(),
        }
    }

    /// Folds `&` over `fs`, starting from the all-ones table.
    pub fn conjunction(self: &Rc<Self>, fs: impl IntoIterator<Item = TruthTable>) -> TruthTable {
        fs.into_iter().fold(self.constant(true), |f, g| &f & &g)
    }

    /// Folds `|` over `fs`, starting from the all-zeros table.
    pub fn disjunction(self: &Rc<Self>, fs: impl IntoIterator<Item = TruthTable>) -> TruthTable {
        fs.into_iter().fold(self.constant(false), |f, g| &f | &g)
    }

    /// Folds `^` over `fs`, starting from the all-zeros table.
    pub fn xor_fold(self: &Rc<Self>, fs: impl IntoIterator<Item = TruthTable>) -> TruthTable {
        fs.into_iter().fold(self.constant(false), |f, g| &f ^ &g)
    }

    /// The irredundant sum-of-products of a function bracketed between a
    /// lower bound `l` (must imply the function) and upper bound `u` (must
    /// be implied by the function), starting the recursion at variable `v`.
    ///
    /// Returns the cube cover and the Boolean function it realizes; callers
    /// that want the cover of a single function `f` call with `l == u == f`.
    /// Cube literals are 1-based: `+k` means variable `k-1` is true, `-k`
    /// means it is false.
    fn isop(&self, l: &TruthTable, u: &TruthTable, v: usize) -> (Vec<BTreeSet<i32>>, TruthTable) {
        if l.is_contradiction() {
            return (Vec::new(), l.clone());
        }
        if u.is_tautology() {
            return (vec![BTreeSet::new()], u.clone());
        }

        let lmin = l.min_variable(v).expect("isop: non-contradiction has a dependent variable");
        let umin = u.min_variable(v).expect("isop: non-tautology has a dependent variable");
        let x = lmin.min(umin);
        let fx1 = self.var_handle(l, x, true);
        let fx0 = self.var_handle(l, x, false);

        let (l1, l0) = l.cofactors(x);
        let (u1, u0) = u.cofactors(x);

        let (c0, f0) = self.isop(&(&l0 & &!&u1), &u0, x + 1);
        let (c1, f1) = self.isop(&(&l1 & &!&u0), &u1, x + 1);

        let lnew = &(&l0 & &!&f0) | &(&l1 & &!&f1);
        let (cstar, fstar) = self.isop(&lnew, &(&u0 & &u1), x + 1);

        let mut cres = Vec::with_capacity(c0.len() + c1.len() + cstar.len());
        for c in &c0 {
            let mut c = c.clone();
            c.insert(-((x + 1) as i32));
            cres.push(c);
        }
        for c in &c1 {
            let mut c = c.clone();
            c.insert((x + 1) as i32);
            cres.push(c);
        }
        cres.extend(cstar);

        let fres = &(&f0 & &fx0) | &(&f1 & &fx1);
        let fres = &fres | &fstar;

        (cres, fres)
    }

    /// A variable table sharing `other`'s universe (used internally by `isop`).
    fn var_handle(&self, other: &TruthTable, v: usize, positive: bool) -> TruthTable {
        TruthTable {
            universe: Rc::clone(&other.universe),
            bits: self.cofactor_masks[positive as usize][v].clone(),
        }
    }
}

/// A Boolean function of `universe.n()` variables, represented as a
/// `2^n`-bit mask: bit `i` (in little-endian minterm order) holds the
/// function's value at the `i`-th assignment.
#[derive(Debug, Clone)]
pub struct TruthTable {
    universe: Rc<TruthTableUniverse>,
    bits: BigUint,
}

impl PartialEq for TruthTable {
    fn eq(&self, other: &Self) -> bool {
        assert!(Rc::ptr_eq(&self.universe, &other.universe), "truth tables from different universes");
        self.bits == other.bits
    }
}
impl Eq for TruthTable {}

impl TruthTable {
    /// The number of variables of the shared universe.
    pub fn nvars(&self) -> usize {
        self.universe.n()
    }

    /// The universe this table was built from.
    pub fn universe(&self) -> &Rc<TruthTableUniverse> {
        &self.universe
    }

    fn assert_same_universe(&self, other: &Self) {
        assert!(
            Rc::ptr_eq(&self.universe, &other.universe),
            "truth table operation across different universes"
        );
    }

    /// Restricts variable `v` to constant `c`, then replicates the kept
    /// half across the dropped half so the result no longer depends on `v`.
    pub fn cofactor(&self, v: usize, c: bool) -> Self {
        let m = &self.universe.cofactor_masks[c as usize][v];
        let mut d = &self.bits & m;
        let nbits = 1usize << v;
        if c {
            d |= &d >> nbits;
        } else {
            d |= &d << nbits;
        }
        Self {
            universe: Rc::clone(&self.universe),
            bits: d,
        }
    }

    /// `(cofactor(v, true), cofactor(v, false))`.
    pub fn cofactors(&self, v: usize) -> (Self, Self) {
        (self.cofactor(v, true), self.cofactor(v, false))
    }

    /// Swaps the roles of variables `x` and `y`.
    pub fn permute(&self, x: usize, y: usize) -> Self {
        let (cx1, cx0) = self.cofactors(x);
        let (cx1y1, cx1y0) = cx1.cofactors(y);
        let (cx0y1, cx0y0) = cx0.cofactors(y);

        let vx = self.universe.var_handle(self, x, true);
        let vx0 = self.universe.var_handle(self, x, false);
        let vy = self.universe.var_handle(self, y, true);
        let vy0 = self.universe.var_handle(self, y, false);

        &(&vy & &(&(&vx & &cx1y1) | &(&vx0 & &cx1y0)))
            | &(&vy0 & &(&(&vx & &cx0y1) | &(&vx0 & &cx0y0)))
    }

    /// Negates this table if `cond` is `true`.
    pub fn negate_if(&self, cond: bool) -> Self {
        if cond {
            !self
        } else {
            self.clone()
        }
    }

    /// The function with variable `v`'s polarity flipped.
    pub fn negate_var(&self, v: usize) -> Self {
        let vv = self.universe.var_handle(self, v, true);
        let vv0 = self.universe.var_handle(self, v, false);
        let (c1, c0) = self.cofactors(v);
        &(&vv & &c0) | &(&vv0 & &c1)
    }

    /// `exists v. self` — the OR of both cofactors on `v`.
    pub fn exists(&self, v: usize) -> Self {
        let (c1, c0) = self.cofactors(v);
        &c1 | &c0
    }

    /// `forall v. self` — the AND of both cofactors on `v`.
    pub fn forall(&self, v: usize) -> Self {
        let (c1, c0) = self.cofactors(v);
        &c1 & &c0
    }

    /// Whether `self` actually depends on variable `v`.
    pub fn depends(&self, v: usize) -> bool {
        let (c1, c0) = self.cofactors(v);
        c1.bits != c0.bits
    }

    /// The variables `self` depends on, in increasing order.
    pub fn depend_vars(&self) -> Vec<usize> {
        (0..self.nvars()).filter(|&v| self.depends(v)).collect()
    }

    /// The first variable at or after `min_v` that `self` depends on.
    pub fn min_variable(&self, min_v: usize) -> Option<usize> {
        (min_v..self.nvars()).find(|&v| self.depends(v))
    }

    pub fn is_tautology(&self) -> bool {
        self.bits == self.universe.mask
    }

    pub fn is_contradiction(&self) -> bool {
        self.bits.is_zero()
    }

    pub fn is_satisfiable(&self) -> bool {
        !self.is_contradiction()
    }

    /// The number of minterms in the on-set.
    pub fn count(&self) -> u64 {
        self.bits.iter_u32_digits().map(|d| d.count_ones() as u64).sum()
    }

    /// All permutations of this table's input variables, in lexicographic
    /// adjacent-swap order.
    pub fn permutations(&self) -> Permutations {
        Permutations {
            current: Some(self.clone()),
            a: (0..self.nvars()).collect(),
            n: self.nvars(),
        }
    }

    /// The `2^n` functions obtained by negating each subset of input variables.
    pub fn negations(&self) -> Negations {
        Negations {
            base: self.clone(),
            n: self.nvars(),
            next: 0,
            total: 1usize << self.nvars(),
        }
    }

    /// Every function NPN-equivalent to `self`: every permutation, every
    /// input negation, and both output polarities.
    pub fn all_npn(&self) -> impl Iterator<Item = TruthTable> + '_ {
        self.permutations().flat_map(|p| {
            p.negations().flat_map(|n| {
                let negated = !&n;
                [n, negated]
            })
        })
    }

    /// The irredundant sum-of-products cover of this function.
    pub fn isop(&self) -> Vec<BTreeSet<i32>> {
        let (cover, f) = self.universe.isop(self, self, 0);
        assert_eq!(&f, self, "isop: recovered function differs from input");
        cover
    }

    /// Canonical multi-line cube listing: one PLA-style row per cube,
    /// `'1'`/`'0'`/`'-'` per variable, sorted lexicographically.
    pub fn sop(&self) -> String {
        let cover = self.isop();
        let n = self.nvars();
        let mut rows: Vec<String> = cover
            .iter()
            .map(|cube| {
                let mut row = String::with_capacity(n + 2);
                for i in 1..=n as i32 {
                    if cube.contains(&i) {
                        row.push('1');
                    } else if cube.contains(&-i) {
                        row.push('0');
                    } else {
                        row.push('-');
                    }
                }
                row.push_str(" 1");
                row
            })
            .collect();
        rows.sort();
        rows.join("\n")
    }

    fn var_name(&self, i: usize) -> String {
        format!("x{}", i)
    }
}

impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cover = self.isop();
        if cover.is_empty() {
            return write!(f, "0");
        }
        if cover.len() == 1 && cover[0].is_empty() {
            return write!(f, "1");
        }
        let terms: Vec<String> = cover
            .iter()
            .map(|cube| {
                let mut literals: Vec<i32> = cube.iter().copied().collect();
                literals.sort_by_key(|l| l.abs());
                literals
                    .into_iter()
                    .map(|l| {
                        if l > 0 {
                            self.var_name((l - 1) as usize)
                        } else {
                            format!("~{}", self.var_name((-l - 1) as usize))
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("&")
            })
            .collect();
        write!(f, "{}", terms.join(" + "))
    }
}

/// Iterator over all `n!` permutations of a [`TruthTable`]'s variables.
pub struct Permutations {
    current: Option<TruthTable>,
    a: Vec<usize>,
    n: usize,
}

impl Iterator for Permutations {
    type Item = TruthTable;

    fn next(&mut self) -> Option<TruthTable> {
        let ret = self.current.take()?;

        let mut pivot = None;
        for j in 1..self.n {
            if self.a[j] > self.a[j - 1] {
                pivot = Some(j);
                break;
            }
        }

        if let Some(j) = pivot {
            let mut tt = ret.clone();
            for l in 0..self.n {
                if self.a[j] > self.a[l] {
                    self.a.swap(j, l);
                    tt = tt.permute(l, j);
                    break;
                }
            }
            let mut k = j - 1;
            let mut l = 0usize;
            while k > l {
                self.a.swap(k, l);
                tt = tt.permute(l, k);
                k -= 1;
                l += 1;
            }
            self.current = Some(tt);
        } else {
            self.current = None;
        }

        Some(ret)
    }
}

/// Iterator over the `2^n` functions obtained by negating subsets of inputs.
pub struct Negations {
    base: TruthTable,
    n: usize,
    next: usize,
    total: usize,
}

impl Iterator for Negations {
    type Item = TruthTable;

    fn next(&mut self) -> Option<TruthTable> {
        if self.next >= self.total {
            return None;
        }
        let m = self.next;
        self.next += 1;
        let mut tt = self.base.clone();
        for v in 0..self.n {
            if m & (1 << v) != 0 {
                tt = tt.negate_var(v);
            }
        }
        Some(tt)
    }
}

impl BitAnd for &TruthTable {
    type Output = TruthTable;
    fn bitand(self, rhs: Self) -> TruthTable {
        self.assert_same_universe(rhs);
        TruthTable {
            universe: Rc::clone(&self.universe),
            bits: &self.bits & &rhs.bits,
        }
    }
}

impl BitOr for &TruthTable {
    type Output = TruthTable;
    fn bitor(self, rhs: Self) -> TruthTable {
        self.assert_same_universe(rhs);
        TruthTable {
            universe: Rc::clone(&self.universe),
            bits: &self.bits | &rhs.bits,
        }
    }
}

impl BitXor for &TruthTable {
    type Output = TruthTable;
    fn bitxor(self, rhs: Self) -> TruthTable {
        self.assert_same_universe(rhs);
        TruthTable {
            universe: Rc::clone(&self.universe),
            bits: &self.bits ^ &rhs.bits,
        }
    }
}

impl Not for &TruthTable {
    type Output = TruthTable;
    fn not(self) -> TruthTable {
        // `num_bigint::BigUint` has no bitwise-not (it is unbounded); the
        // complement only makes sense within this universe's fixed width, so
        // XOR against the all-ones mask instead.
        TruthTable {
            universe: Rc::clone(&self.universe),
            bits: &self.universe.mask ^ &self.bits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cofactor_reconstructs_function() {
        let u = TruthTableUniverse::new(3);
        let f = &(&u.var(0) & &u.var(1)) | &u.var(2);
        for v in 0..3 {
            let (c1, c0) = f.cofactors(v);
            let reconstructed = &(&c1 & &u.var(v)) | &(&c0 & &!&u.var(v));
            assert_eq!(reconstructed, f);
        }
    }

    #[test]
    fn depends_detects_relevant_variables() {
        let u = TruthTableUniverse::new(3);
        let f = &u.var(0) & &u.var(2);
        assert!(f.depends(0));
        assert!(!f.depends(1));
        assert!(f.depends(2));
    }

    #[test]
    fn isop_of_xor2_has_two_cubes() {
        let u = TruthTableUniverse::new(2);
        let f = &u.var(0) ^ &u.var(1);
        let mut cover = f.isop();
        cover.sort_by_key(|c| c.iter().copied().collect::<Vec<_>>());
        assert_eq!(cover.len(), 2);
        let expect_a: BTreeSet<i32> = [1, -2].into_iter().collect();
        let expect_b: BTreeSet<i32> = [-1, 2].into_iter().collect();
        assert!(cover.contains(&expect_a));
        assert!(cover.contains(&expect_b));
    }

    #[test]
    fn isop_recovers_function_exactly() {
        let u = TruthTableUniverse::new(4);
        let f = &(&u.var(0) & &u.var(1)) | &(&u.var(2) ^ &u.var(3));
        let cover = f.isop();
        let mut rebuilt = u.constant(false);
        for cube in &cover {
            let mut term = u.constant(true);
            for &lit in cube {
                let v = (lit.unsigned_abs() - 1) as usize;
                term = &term & &u.var_with_polarity(v, lit > 0);
            }
            rebuilt = &rebuilt | &term;
        }
        assert_eq!(rebuilt, f);
    }

    #[test]
    fn count_is_popcount() {
        let u = TruthTableUniverse::new(2);
        assert_eq!(u.var(0).count(), 2);
        assert_eq!(u.constant(true).count(), 4);
        assert_eq!(u.constant(false).count(), 0);
    }

    #[test]
    fn permutations_visits_all_orderings() {
        let u = TruthTableUniverse::new(3);
        let f = &(&u.var(0) & &u.var(1)) | &!&u.var(2);
        let perms: Vec<_> = f.permutations().collect();
        assert_eq!(perms.len(), 6);
    }

    #[test]
    fn negations_visits_all_input_polarities() {
        let u = TruthTableUniverse::new(2);
        let f = &u.var(0) & &u.var(1);
        let negs: Vec<_> = f.negations().collect();
        assert_eq!(negs.len(), 4);
    }

    #[test]
    fn display_matches_xor_expression() {
        let u = TruthTableUniverse::new(2);
        let f = &u.var(0) ^ &u.var(1);
        let text = f.to_string();
        assert!(text == "x0&~x1 + ~x0&x1" || text == "~x0&x1 + x0&~x1");
    }
}
