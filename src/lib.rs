// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

/*!
# Radial Power Flow

This is a library for evaluating how power flows through a radial electrical
distribution network: one primary source feeding consumers through
transformers, lines and separators, with optional additional sources as
backup feeds.

## The `Topology`

The network description ([`Network`]) is handed over by a configuration
loader and turned into a [`Topology`] with the
[`try_new`][Topology::try_new] method.  Every node except the sources has a
single *downstream link*, the ID of the next node power flows into.

The [`try_new`][Topology::try_new] method checks that:

- Node IDs are non-empty and unique.
- Physical parameters are usable, e.g. lines have a positive voltage and
  cross-section area.

Depending on the [`FlowConfig`], it also rejects or just reports:

- Downstream links to unknown nodes.
- Cycles in the downstream links.
- Nodes that can't be reached from any source.

## Power flow

A [`FlowEngine`] evaluates one topology snapshot per call:

- Power is pushed from the primary source down its chain, each node visited
  at most once.  Transformers charge their core and copper losses on the
  low-voltage leg, lines report their losses, open separators forward zero
  power, and consumers subtract their demand.
- Additional sources whose connecting separators are closed then inject
  their own power, without re-evaluating nodes already reached.

The resulting [`FlowReport`] holds the computed values per node, the
under-supplied consumers, and an ordered sequence of [`LogRecord`]s that can
be handed to a [`LogSink`].

The electrical relations the engine relies on are available in the
[`formulas`] module.
*/

mod config;
pub use config::FlowConfig;

mod error;
pub use error::{Error, ErrorKind};

mod flow;
pub use flow::{
    Deficit, Deficits, FlowEngine, FlowReport, LineFlow, LogRecord, LogSink, NodeFlow,
    TracingSink,
};

pub mod formulas;

mod network;
pub use network::{Consumer, Line, Network, NetworkNode, Separator, Source, Transformer};

mod node_kind;
pub use node_kind::{NodeKind, SeparatorState, TransformerType};

mod topology;
pub use topology::{iterators, Topology};
