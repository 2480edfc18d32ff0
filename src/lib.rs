//! And-inverter graphs: structurally hashed construction, the binary AIGER
//! codec, a bit-packed truth-table engine, and a combinational simulator.
//!
//! An [`Aig`] is a network of two-input AND gates and inverters over
//! primary inputs and latches, built through a strashing constructor so
//! that no two AND nodes ever share the same (fanin, fanin) pair. See
//! [`aig`] for the graph itself, [`aiger`] for the on-disk formats,
//! [`truth_table`] and [`aig_to_tt`] for combinational evaluation, and
//! [`simulator`] for driving a sequential AIG through an explicit trace.

pub mod aig;
pub mod aig_to_tt;
pub mod aiger;
pub mod cnf;
pub mod error;
pub mod literal;
mod names;
pub mod node;
pub mod simulator;
pub mod truth_table;

pub use aig::{Aig, LiteralMap, PoId, PoType};
pub use error::{AigError, Result};
pub use literal::Literal;
pub use node::LatchInit;
pub use simulator::{read_cex, simulate, CexWitness, Frame};
pub use truth_table::{TruthTable, TruthTableUniverse};
