//! The And-Inverter Graph container: construction, mutation, traversal.

use std::collections::{HashMap, HashSet};

use log::{info, trace};

use crate::literal::Literal;
use crate::names::NameTable;
use crate::node::{LatchInit, Node};

/// The type of a primary output.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PoType {
    Output,
    BadStates,
    Constraint,
    Justice,
    Fairness,
}

/// The identifier of a primary output: its index in creation order.
pub type PoId = usize;

/// A bijective literal-to-literal map used to seed [`Aig::compose`] and as
/// the internal scaffolding of [`Aig::clean`].
///
/// Keys are always stored positive; a lookup re-applies the query literal's
/// polarity to whatever polarity was recorded for the mapped literal, so
/// callers can query with either polarity against a canonically-keyed map.
#[derive(Debug, Clone)]
pub struct LiteralMap(HashMap<Literal, Literal>);

impl LiteralMap {
    pub fn new() -> Self {
        let mut map = HashMap::new();
        map.insert(Literal::FALSE, Literal::FALSE);
        LiteralMap(map)
    }

    pub fn set(&mut self, src: Literal, dst: Literal) {
        self.0.insert(src.positive(), dst.negate_if(src.is_negated()));
    }

    pub fn get(&self, src: Literal) -> Literal {
        let base = *self
            .0
            .get(&src.positive())
            .unwrap_or_else(|| panic!("literal map: no entry for {}", src.positive()));
        base.negate_if(src.is_negated())
    }

    pub fn contains(&self, src: Literal) -> bool {
        self.0.contains_key(&src.positive())
    }
}

impl Default for LiteralMap {
    fn default() -> Self {
        Self::new()
    }
}

/// An And-Inverter Graph: PIs, latches, AND gates and buffers strashed over
/// a single node array, plus primary outputs grouped into typed lists and
/// optional justice groupings of JUSTICE-typed POs.
#[derive(Debug, Clone)]
pub struct Aig {
    nodes: Vec<Node>,
    pis: Vec<Literal>,
    latches: Vec<Literal>,
    buffers: Vec<Option<Literal>>,
    pos: Vec<(Literal, PoType)>,
    justice: Vec<Vec<PoId>>,
    strash: HashMap<(Literal, Literal), Literal>,
    node_names: NameTable<Literal>,
    po_names: NameTable<PoId>,
    fanouts: Option<HashMap<Literal, Vec<Literal>>>,
}

impl Default for Aig {
    fn default() -> Self {
        Self::new()
    }
}

impl Aig {
    pub fn new() -> Self {
        Aig {
            nodes: vec![Node::Const0],
            pis: Vec::new(),
            latches: Vec::new(),
            buffers: Vec::new(),
            pos: Vec::new(),
            justice: Vec::new(),
            strash: HashMap::new(),
            node_names: NameTable::new(),
            po_names: NameTable::new(),
            fanouts: None,
        }
    }

    fn node(&self, f: Literal) -> &Node {
        &self.nodes[f.id() as usize]
    }

    // ---- construction ----------------------------------------------------

    pub fn get_const0(&self) -> Literal {
        Literal::FALSE
    }

    pub fn create_pi(&mut self, name: Option<&str>) -> Literal {
        let index = self.pis.len() as u32;
        let id = self.nodes.len() as u32;
        self.nodes.push(Node::Pi { index });
        let lit = Literal::from_id(id);
        self.pis.push(lit);
        if let Some(name) = name {
            self.set_name(lit, name);
        }
        self.fanouts = None;
        lit
    }

    pub fn create_latch(
        &mut self,
        init: LatchInit,
        next: Option<Literal>,
        name: Option<&str>,
    ) -> Literal {
        let index = self.latches.len() as u32;
        let id = self.nodes.len() as u32;
        self.nodes.push(Node::Latch { index, init, next });
        let lit = Literal::from_id(id);
        self.latches.push(lit);
        if let Some(name) = name {
            self.set_name(lit, name);
        }
        self.fanouts = None;
        lit
    }

    /// Creates an AND gate, applying the standard normalizations (constant
    /// folding, idempotence, contradiction) and structural hashing. Returns
    /// an existing node's literal whenever the normalized pair was already
    /// built.
    pub fn create_and(&mut self, left: Literal, right: Literal) -> Literal {
        let (mut l, mut r) = (left, right);
        if l < r {
            std::mem::swap(&mut l, &mut r);
        }
        if r == Literal::FALSE {
            return Literal::FALSE;
        }
        if r == Literal::TRUE {
            return l;
        }
        if l == r {
            return l;
        }
        if l == r.negate() {
            return Literal::FALSE;
        }
        let key = (l, r);
        if let Some(&hit) = self.strash.get(&key) {
            return hit;
        }
        let id = self.nodes.len() as u32;
        self.nodes.push(Node::And { left: l, right: r });
        let lit = Literal::from_id(id);
        self.strash.insert(key, lit);
        self.fanouts = None;
        lit
    }

    pub fn create_buffer(&mut self, fanin: Literal, name: Option<&str>) -> Literal {
        let index = self.buffers.len() as u32;
        let id = self.nodes.len() as u32;
        debug_assert!(
            fanin.id() < id,
            "create_buffer: fanin {} must be strictly less than the buffer's own literal",
            fanin
        );
        self.nodes.push(Node::Buffer { index, fanin });
        let lit = Literal::from_id(id);
        self.buffers.push(Some(lit));
        if let Some(name) = name {
            self.set_name(lit, name);
        }
        self.fanouts = None;
        lit
    }

    pub fn create_po(&mut self, fanin: Literal, po_type: PoType, name: Option<&str>) -> PoId {
        let po_id = self.pos.len();
        self.pos.push((fanin, po_type));
        if let Some(name) = name {
            self.set_po_name(po_id, name);
        }
        po_id
    }

    /// Groups a set of JUSTICE-typed POs into one justice property.
    ///
    /// # Panics
    ///
    /// Panics if any of `po_ids` is not typed JUSTICE.
    pub fn create_justice(&mut self, po_ids: Vec<PoId>) -> usize {
        for &po in &po_ids {
            assert_eq!(
                self.pos[po].1,
                PoType::Justice,
                "create_justice: PO {} is not JUSTICE-typed",
                po
            );
        }
        let j_id = self.justice.len();
        self.justice.push(po_ids);
        j_id
    }

    /// Retypes every JUSTICE PO back to OUTPUT and discards all groupings.
    pub fn remove_justice(&mut self) {
        for group in std::mem::take(&mut self.justice) {
            for po in group {
                self.pos[po].1 = PoType::Output;
            }
        }
    }

    // ---- derived Boolean builders -----------------------------------------

    pub fn create_or(&mut self, a: Literal, b: Literal) -> Literal {
        self.create_and(a.negate(), b.negate()).negate()
    }

    pub fn create_xor(&mut self, a: Literal, b: Literal) -> Literal {
        let t1 = self.create_and(a, b.negate());
        let t2 = self.create_and(a.negate(), b);
        self.create_or(t1, t2)
    }

    pub fn create_iff(&mut self, a: Literal, b: Literal) -> Literal {
        self.create_xor(a, b).negate()
    }

    pub fn create_implies(&mut self, a: Literal, b: Literal) -> Literal {
        self.create_or(a.negate(), b)
    }

    pub fn create_ite(&mut self, cond: Literal, then: Literal, else_: Literal) -> Literal {
        let t1 = self.create_and(cond, then);
        let t2 = self.create_and(cond.negate(), else_);
        self.create_or(t1, t2)
    }

    pub fn conjunction(&mut self, lits: impl IntoIterator<Item = Literal>) -> Literal {
        lits.into_iter()
            .fold(Literal::TRUE, |acc, f| self.create_and(acc, f))
    }

    pub fn disjunction(&mut self, lits: impl IntoIterator<Item = Literal>) -> Literal {
        lits.into_iter()
            .fold(Literal::FALSE, |acc, f| self.create_or(acc, f))
    }

    /// Builds a balanced AND-tree over `lits` rather than a left-leaning
    /// chain, keeping the resulting cone's depth logarithmic.
    pub fn balanced_conjunction(&mut self, lits: &[Literal]) -> Literal {
        self.balanced_fold(lits, Literal::TRUE, Self::create_and)
    }

    pub fn balanced_disjunction(&mut self, lits: &[Literal]) -> Literal {
        self.balanced_fold(lits, Literal::FALSE, Self::create_or)
    }

    fn balanced_fold(
        &mut self,
        lits: &[Literal],
        empty: Literal,
        op: impl Fn(&mut Self, Literal, Literal) -> Literal + Copy,
    ) -> Literal {
        match lits.len() {
            0 => empty,
            1 => lits[0],
            n => {
                let mid = n / 2;
                let l = self.balanced_fold(&lits[..mid], empty, op);
                let r = self.balanced_fold(&lits[mid..], empty, op);
                op(self, l, r)
            }
        }
    }

    // ---- mutation -----------------------------------------------------

    /// # Panics
    /// Panics if `latch` is not a latch literal, or is negated.
    pub fn set_next(&mut self, latch: Literal, next: Literal) {
        assert!(!latch.is_negated(), "set_next: latch literal must be positive");
        match &mut self.nodes[latch.id() as usize] {
            Node::Latch { next: slot, .. } => *slot = Some(next),
            _ => panic!("set_next: literal {} is not a latch", latch),
        }
    }

    pub fn set_init(&mut self, latch: Literal, init: LatchInit) {
        assert!(!latch.is_negated(), "set_init: latch literal must be positive");
        match &mut self.nodes[latch.id() as usize] {
            Node::Latch { init: slot, .. } => *slot = init,
            _ => panic!("set_init: literal {} is not a latch", latch),
        }
    }

    pub fn set_po_fanin(&mut self, po: PoId, fanin: Literal) {
        self.pos[po].0 = fanin;
    }

    pub fn set_po_type(&mut self, po: PoId, po_type: PoType) {
        self.pos[po].1 = po_type;
    }

    // ---- names ----------------------------------------------------------

    pub fn set_name(&mut self, f: Literal, name: impl Into<String>) {
        self.node_names.insert(f.positive(), name);
    }

    pub fn name_of(&self, f: Literal) -> Option<&str> {
        self.node_names.name_of(f.positive())
    }

    pub fn has_name(&self, f: Literal) -> bool {
        self.node_names.has_name(f.positive())
    }

    pub fn get_by_name(&self, name: &str) -> Option<Literal> {
        self.node_names.key_of(name)
    }

    pub fn remove_name(&mut self, f: Literal) {
        self.node_names.remove_by_key(f.positive());
    }

    pub fn names(&self) -> impl Iterator<Item = (Literal, &str)> {
        self.node_names.iter()
    }

    pub fn set_po_name(&mut self, po: PoId, name: impl Into<String>) {
        self.po_names.insert(po, name);
    }

    pub fn po_name_of(&self, po: PoId) -> Option<&str> {
        self.po_names.name_of(po)
    }

    pub fn po_by_name(&self, name: &str) -> Option<PoId> {
        self.po_names.key_of(name)
    }

    pub fn po_names(&self) -> impl Iterator<Item = (PoId, &str)> {
        self.po_names.iter()
    }

    /// Assigns `{prefix}{n}` names to every unnamed PI, in PI order,
    /// skipping any candidate name already in use.
    pub fn fill_pi_names(&mut self, prefix: &str) {
        let pis = self.pis.clone();
        self.fill_names(&pis, prefix);
    }

    pub fn fill_po_names(&mut self, prefix: &str) {
        let mut counter = 0usize;
        for po in 0..self.pos.len() {
            if self.po_names.has_name(po) {
                continue;
            }
            loop {
                let candidate = format!("{}{}", prefix, counter);
                counter += 1;
                if !self.po_names.name_exists(&candidate) {
                    self.set_po_name(po, candidate);
                    break;
                }
            }
        }
    }

    fn fill_names(&mut self, lits: &[Literal], prefix: &str) {
        let mut counter = 0usize;
        for &f in lits {
            if self.node_names.has_name(f) {
                continue;
            }
            loop {
                let candidate = format!("{}{}", prefix, counter);
                counter += 1;
                if !self.node_names.name_exists(&candidate) {
                    self.set_name(f, candidate);
                    break;
                }
            }
        }
    }

    // ---- queries ----------------------------------------------------------

    pub fn is_pi(&self, f: Literal) -> bool {
        self.node(f).is_pi()
    }

    pub fn is_latch(&self, f: Literal) -> bool {
        self.node(f).is_latch()
    }

    pub fn is_and(&self, f: Literal) -> bool {
        self.node(f).is_and()
    }

    pub fn is_buffer(&self, f: Literal) -> bool {
        self.node(f).is_buffer()
    }

    pub fn is_const0(&self, f: Literal) -> bool {
        f.positive() == Literal::FALSE
    }

    pub fn and_fanins(&self, f: Literal) -> (Literal, Literal) {
        match self.node(f) {
            Node::And { left, right } => (*left, *right),
            _ => panic!("and_fanins: literal {} is not an AND gate", f),
        }
    }

    pub fn buffer_fanin(&self, f: Literal) -> Literal {
        match self.node(f) {
            Node::Buffer { fanin, .. } => *fanin,
            _ => panic!("buffer_fanin: literal {} is not a buffer", f),
        }
    }

    pub fn latch_next(&self, f: Literal) -> Option<Literal> {
        match self.node(f) {
            Node::Latch { next, .. } => *next,
            _ => panic!("latch_next: literal {} is not a latch", f),
        }
    }

    pub fn latch_init(&self, f: Literal) -> LatchInit {
        match self.node(f) {
            Node::Latch { init, .. } => *init,
            _ => panic!("latch_init: literal {} is not a latch", f),
        }
    }

    pub fn po_fanin(&self, po: PoId) -> Literal {
        self.pos[po].0
    }

    pub fn po_type(&self, po: PoId) -> PoType {
        self.pos[po].1
    }

    pub fn n_pis(&self) -> usize {
        self.pis.len()
    }

    pub fn n_latches(&self) -> usize {
        self.latches.len()
    }

    pub fn n_ands(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_and()).count()
    }

    pub fn n_buffers(&self) -> usize {
        self.buffers.len()
    }

    pub fn n_nonterminals(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_nonterminal()).count()
    }

    pub fn n_pos(&self) -> usize {
        self.pos.len()
    }

    /// The size of the underlying node array, including the constant-0 node.
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn n_justice(&self) -> usize {
        self.justice.len()
    }

    pub fn pis(&self) -> impl Iterator<Item = Literal> + '_ {
        self.pis.iter().copied()
    }

    pub fn latches(&self) -> impl Iterator<Item = Literal> + '_ {
        self.latches.iter().copied()
    }

    pub fn and_gates(&self) -> impl Iterator<Item = Literal> + '_ {
        (1..self.nodes.len() as u32)
            .map(Literal::from_id)
            .filter(move |&f| self.node(f).is_and())
    }

    pub fn buffers(&self) -> impl Iterator<Item = Literal> + '_ {
        self.buffers.iter().filter_map(|b| *b)
    }

    pub fn nonterminals(&self) -> impl Iterator<Item = Literal> + '_ {
        (1..self.nodes.len() as u32)
            .map(Literal::from_id)
            .filter(move |&f| self.node(f).is_nonterminal())
    }

    pub fn po_ids(&self) -> impl Iterator<Item = PoId> {
        0..self.pos.len()
    }

    pub fn po_ids_of_type(&self, po_type: PoType) -> impl Iterator<Item = PoId> + '_ {
        self.po_ids().filter(move |&p| self.pos[p].1 == po_type)
    }

    pub fn justice_groups(&self) -> impl Iterator<Item = &[PoId]> {
        self.justice.iter().map(|v| v.as_slice())
    }

    pub fn justice_group(&self, j_id: usize) -> &[PoId] {
        &self.justice[j_id]
    }

    // ---- fanout index -------------------------------------------------

    fn ensure_fanouts(&mut self) {
        if self.fanouts.is_some() {
            return;
        }
        let mut map: HashMap<Literal, Vec<Literal>> = HashMap::new();
        for id in 1..self.nodes.len() as u32 {
            let f = Literal::from_id(id);
            for fanin in self.node(f).combinational_fanins() {
                map.entry(fanin.positive()).or_default().push(f);
            }
        }
        self.fanouts = Some(map);
    }

    /// Returns the union of combinational fanouts of `roots`, building the
    /// fanout index on first use and caching it until the next mutation.
    pub fn get_fanouts(&mut self, roots: impl IntoIterator<Item = Literal>) -> HashSet<Literal> {
        self.ensure_fanouts();
        let fanouts = self.fanouts.as_ref().unwrap();
        let mut out = HashSet::new();
        for f in roots {
            if let Some(fs) = fanouts.get(&f.positive()) {
                out.extend(fs.iter().copied());
            }
        }
        out
    }

    // ---- cones and topological order -----------------------------------

    /// The combinational cone of `roots`: `roots` and everything reachable
    /// through AND/buffer fanins, stopping at (and excluding expansion past)
    /// any literal in `stop`.
    pub fn get_cone(
        &self,
        roots: impl IntoIterator<Item = Literal>,
        stop: &HashSet<Literal>,
    ) -> HashSet<Literal> {
        self.cone_with(roots, stop, Node::combinational_fanins)
    }

    /// As [`Aig::get_cone`], but also follows latch `next` edges.
    pub fn get_seq_cone(
        &self,
        roots: impl IntoIterator<Item = Literal>,
        stop: &HashSet<Literal>,
    ) -> HashSet<Literal> {
        self.cone_with(roots, stop, Node::sequential_fanins)
    }

    fn cone_with(
        &self,
        roots: impl IntoIterator<Item = Literal>,
        stop: &HashSet<Literal>,
        fanins: impl Fn(&Node) -> Vec<Literal>,
    ) -> HashSet<Literal> {
        let mut visited = HashSet::new();
        let mut stack = Vec::new();
        for root in roots {
            let root = root.positive();
            if stop.contains(&root) || !visited.insert(root) {
                continue;
            }
            stack.push(root);
        }
        while let Some(f) = stack.pop() {
            for fanin in fanins(self.node(f)) {
                let fanin = fanin.positive();
                trace!("cone: {} reaches fanin {}", f, fanin);
                if !stop.contains(&fanin) && visited.insert(fanin) {
                    stack.push(fanin);
                }
            }
        }
        visited
    }

    /// Returns `roots`' combinational fanin cone in topological order
    /// (fanins before fanouts), via an explicit-stack iterative post-order
    /// DFS rather than recursion.
    pub fn topological_sort(
        &self,
        roots: impl IntoIterator<Item = Literal>,
        stop: &HashSet<Literal>,
    ) -> Vec<Literal> {
        struct Frame {
            lit: Literal,
            fanins: Vec<Literal>,
            idx: usize,
        }

        let mut order = Vec::new();
        let mut visited: HashSet<Literal> = HashSet::new();
        let mut stack: Vec<Frame> = Vec::new();

        for root in roots {
            let root = root.positive();
            if stop.contains(&root) || !visited.insert(root) {
                continue;
            }
            stack.push(Frame {
                lit: root,
                fanins: self.node(root).combinational_fanins(),
                idx: 0,
            });
            while let Some(frame) = stack.last_mut() {
                if frame.idx < frame.fanins.len() {
                    let next = frame.fanins[frame.idx].positive();
                    frame.idx += 1;
                    if !stop.contains(&next) && visited.insert(next) {
                        stack.push(Frame {
                            lit: next,
                            fanins: self.node(next).combinational_fanins(),
                            idx: 0,
                        });
                    }
                } else {
                    trace!("topological_sort: visiting {}", frame.lit);
                    order.push(frame.lit);
                    stack.pop();
                }
            }
        }
        order
    }

    // ---- clean, compose, cutpoint ------------------------------------

    /// Rebuilds the cone(s) needed by `selected` POs (all POs if `None`)
    /// into a fresh, tightly packed `Aig`: unreachable PIs, latches and AND
    /// gates are dropped, names are preserved (a `~` prefix marks a name
    /// whose node ended up negated relative to the source), and justice
    /// groupings are *not* rebuilt here — see [`Aig::extract_justice_po`].
    ///
    /// # Panics
    ///
    /// Panics if the selected cone still contains a buffer: buffers must be
    /// resolved via [`Aig::cutpoint`] before cleaning.
    pub fn clean(&self, selected: Option<&[PoId]>) -> Aig {
        let selected: Vec<PoId> = match selected {
            Some(s) => s.to_vec(),
            None => (0..self.pos.len()).collect(),
        };
        let roots: Vec<Literal> = selected.iter().map(|&p| self.pos[p].0).collect();
        let cone = self.get_seq_cone(roots.iter().copied(), &HashSet::new());
        info!("clean: {} POs selected, cone has {} nodes", selected.len(), cone.len());

        let mut dst = Aig::new();
        let mut map = LiteralMap::new();

        for id in 1..self.nodes.len() as u32 {
            let f = Literal::from_id(id);
            if !cone.contains(&f) {
                continue;
            }
            let dst_lit = match &self.nodes[id as usize] {
                Node::Const0 => continue,
                Node::Pi { .. } => dst.create_pi(None),
                Node::And { left, right } => dst.create_and(map.get(*left), map.get(*right)),
                Node::Latch { init, .. } => dst.create_latch(*init, None, None),
                Node::Buffer { .. } => {
                    panic!("clean: buffer {} present in selected cone; cutpoint it first", f)
                }
            };
            if let Some(name) = self.node_names.name_of(f) {
                if dst_lit.is_negated() {
                    dst.set_name(dst_lit.positive(), format!("~{}", name));
                } else {
                    dst.set_name(dst_lit, name);
                }
            }
            map.set(f, dst_lit);
        }

        for &src_latch in &self.latches {
            if !cone.contains(&src_latch.positive()) {
                continue;
            }
            if let Some(src_next) = self.latch_next(src_latch) {
                let dst_latch = map.get(src_latch);
                let dst_next = map.get(src_next);
                dst.set_next(dst_latch.positive(), dst_next);
            }
        }

        for &po in &selected {
            let (fanin, po_type) = self.pos[po];
            let dst_po = dst.create_po(map.get(fanin), po_type, None);
            if let Some(name) = self.po_names.name_of(po) {
                dst.set_po_name(dst_po, name);
            }
        }

        dst
    }

    /// Splices `src` into `self`: every literal of `src` not already bound
    /// in `map` gets a corresponding node created in `self`, in `src`'s
    /// construction order (which guarantees fanins precede fanouts), after
    /// which latch `next` pointers are rebound and, if `copy_pos`, `src`'s
    /// POs are appended to `self`.
    pub fn compose(&mut self, src: &Aig, map: &mut LiteralMap, copy_pos: bool) {
        info!("compose: splicing {} source nodes", src.nodes.len() - 1);
        for id in 1..src.nodes.len() as u32 {
            let f = Literal::from_id(id);
            if map.contains(f) {
                continue;
            }
            let dst_lit = match &src.nodes[id as usize] {
                Node::Const0 => continue,
                Node::Pi { .. } => self.create_pi(None),
                Node::And { left, right } => self.create_and(map.get(*left), map.get(*right)),
                Node::Latch { init, .. } => self.create_latch(*init, None, None),
                Node::Buffer { fanin, .. } => self.create_buffer(map.get(*fanin), None),
            };
            map.set(f, dst_lit);
        }

        for &src_latch in &src.latches {
            if let Some(src_next) = src.latch_next(src_latch) {
                let dst_latch = map.get(src_latch);
                let dst_next = map.get(src_next);
                self.set_next(dst_latch.positive(), dst_next);
            }
        }

        if copy_pos {
            for &(fanin, po_type) in &src.pos {
                self.create_po(map.get(fanin), po_type, None);
            }
        }
    }

    /// Converts a named buffer into a fresh PI in place, discarding its
    /// fanin. Used to turn a cutpoint boundary into a genuine input before
    /// further structural transforms (which otherwise forbid buffers).
    ///
    /// # Panics
    ///
    /// Panics if `buf` is not a buffer, or is unnamed.
    pub fn cutpoint(&mut self, buf: Literal) {
        assert!(self.is_buffer(buf), "cutpoint: literal {} is not a buffer", buf);
        assert!(
            self.has_name(buf),
            "cutpoint: buffer {} must be named before conversion",
            buf
        );
        let buf_index = match self.node(buf) {
            Node::Buffer { index, .. } => *index as usize,
            _ => unreachable!(),
        };
        self.buffers[buf_index] = None;
        let index = self.pis.len() as u32;
        self.nodes[buf.id() as usize] = Node::Pi { index };
        self.pis.push(buf.positive());
        self.fanouts = None;
    }

    /// Extracts the sub-AIG needed to check a single justice property: all
    /// CONSTRAINT and FAIRNESS POs, plus the JUSTICE POs of group `j_id`,
    /// cleaned into a fresh `Aig` and regrouped into that AIG's sole
    /// justice property.
    pub fn extract_justice_po(&self, j_id: usize) -> Aig {
        let mut selected: Vec<PoId> = self.po_ids_of_type(PoType::Constraint).collect();
        let n_constraints = selected.len();
        let justice_pos = self.justice[j_id].clone();
        selected.extend(justice_pos.iter().copied());
        selected.extend(self.po_ids_of_type(PoType::Fairness));

        let mut dst = self.clean(Some(&selected));
        let new_justice_ids: Vec<PoId> =
            (n_constraints..n_constraints + justice_pos.len()).collect();
        dst.create_justice(new_justice_ids);
        dst
    }
}
