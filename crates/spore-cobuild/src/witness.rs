//! Cobuild witness packing.
//!
//! The action list of a transaction travels in one witness holding a
//! `WitnessLayout` union. Only the `SighashAll` variant is produced here:
//!
//! ```text
//! union WitnessLayout { SighashAll: 0xFF000001, SighashAllOnly: 0xFF000002,
//!                       Otx: 0xFF000003, OtxStart: 0xFF000004 }
//! table SighashAll { message: Message, seal: Bytes }
//! table Message    { actions: ActionVec }
//! ```
//!
//! A skeleton carries at most one cobuild envelope. Packing into a skeleton
//! that already has a `SighashAll` envelope merges: earlier actions stay
//! first and the envelope is rewritten where it was. Any other cobuild
//! layout already present is rejected. Envelopes are decoded strictly, so
//! one carrying fields this schema does not know fails instead of being
//! rewritten without them.

use ckb_types::prelude::*;
use log::debug;

use crate::action::Action;
use crate::error::{Result, SporeError};
use crate::schema::cobuild as mol;
use crate::types::Transaction;

pub const SIGHASH_ALL: u32 = 0xFF00_0001;
pub const SIGHASH_ALL_ONLY: u32 = 0xFF00_0002;
pub const OTX: u32 = 0xFF00_0003;
pub const OTX_START: u32 = 0xFF00_0004;

/// The ordered action list of a transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    pub actions: Vec<Action>,
}

impl Message {
    pub fn pack(&self) -> mol::Message {
        self.actions
            .iter()
            .map(Action::pack)
            .collect::<Vec<_>>()
            .into()
    }
}

impl From<mol::Message> for Message {
    fn from(value: mol::Message) -> Self {
        Self {
            actions: value.actions().into_iter().map(Action::from).collect(),
        }
    }
}

/// A cobuild witness envelope.
#[derive(Debug, Clone)]
pub enum WitnessLayout {
    SighashAll { seal: Vec<u8>, message: Message },
    /// Any other cobuild variant, kept as decoded.
    Other(mol::WitnessLayoutUnion),
}

impl WitnessLayout {
    /// A `SighashAll` envelope with an empty seal placeholder.
    pub fn sighash_all(actions: Vec<Action>) -> Self {
        Self::SighashAll {
            seal: Vec::new(),
            message: Message { actions },
        }
    }

    pub fn pack(&self) -> mol::WitnessLayout {
        match self {
            Self::SighashAll { seal, message } => mol::SighashAll::new_builder()
                .message(message.pack())
                .seal(seal.as_slice().pack())
                .build()
                .into(),
            Self::Other(item) => mol::WitnessLayout::new_builder().set(item.clone()).build(),
        }
    }

    pub fn decode(slice: &[u8]) -> Result<Self> {
        let layout = match mol::WitnessLayout::from_slice(slice)?.to_enum() {
            mol::WitnessLayoutUnion::SighashAll(sighash_all) => Self::SighashAll {
                seal: sighash_all.seal().raw_data().to_vec(),
                message: sighash_all.message().into(),
            },
            other => Self::Other(other),
        };
        Ok(layout)
    }

    /// Union item id of this envelope.
    pub fn item_id(&self) -> u32 {
        match self {
            Self::SighashAll { .. } => SIGHASH_ALL,
            Self::Other(item) => item.item_id(),
        }
    }

    /// Actions carried by this envelope; empty for non-`SighashAll` layouts.
    pub fn actions(&self) -> &[Action] {
        match self {
            Self::SighashAll { message, .. } => &message.actions,
            Self::Other(_) => &[],
        }
    }
}

/// The cobuild union id a witness starts with, if any.
///
/// A `WitnessArgs` table starts with its total size, which never reaches
/// the `0xFF00_0000` range, so the two cannot be confused.
fn cobuild_item_id(witness: &[u8]) -> Option<u32> {
    let head: [u8; 4] = witness.get(..4)?.try_into().ok()?;
    let id = u32::from_le_bytes(head);
    (SIGHASH_ALL..=OTX_START).contains(&id).then_some(id)
}

/// Index and union id of the first cobuild witness.
fn locate_cobuild_witness(tx: &Transaction) -> Option<(usize, u32)> {
    tx.witnesses
        .iter()
        .enumerate()
        .find_map(|(index, witness)| cobuild_item_id(witness).map(|id| (index, id)))
}

/// Locate the first cobuild envelope in the skeleton's witnesses.
pub fn find_cobuild_witness(tx: &Transaction) -> Result<Option<(usize, WitnessLayout)>> {
    let Some((index, _)) = locate_cobuild_witness(tx) else {
        return Ok(None);
    };
    Ok(Some((index, WitnessLayout::decode(&tx.witnesses[index])?)))
}

/// Bind `actions` to the transaction through its cobuild witness.
///
/// Appends a new `SighashAll` envelope, or merges into the existing one.
/// Returns the index of the cobuild witness.
pub fn pack_cobuild(tx: &mut Transaction, actions: Vec<Action>) -> Result<usize> {
    match locate_cobuild_witness(tx) {
        None => {
            debug!("cobuild witness appended with {} actions", actions.len());
            let layout = WitnessLayout::sighash_all(actions).pack();
            tx.witnesses.push(layout.as_slice().to_vec());
            Ok(tx.witnesses.len() - 1)
        }
        Some((index, SIGHASH_ALL)) => match WitnessLayout::decode(&tx.witnesses[index])? {
            WitnessLayout::SighashAll { seal, mut message } => {
                debug!(
                    "cobuild witness #{index}: {} existing + {} new actions",
                    message.actions.len(),
                    actions.len()
                );
                message.actions.extend(actions);
                let layout = WitnessLayout::SighashAll { seal, message }.pack();
                tx.witnesses[index] = layout.as_slice().to_vec();
                Ok(index)
            }
            WitnessLayout::Other(_) => Err(SporeError::ConflictingCobuildWitness(index)),
        },
        Some((index, _)) => Err(SporeError::ConflictingCobuildWitness(index)),
    }
}

/// Actions already bound to the transaction, in order.
pub fn cobuild_actions(tx: &Transaction) -> Result<Vec<Action>> {
    Ok(find_cobuild_witness(tx)?
        .map(|(_, layout)| layout.actions().to_vec())
        .unwrap_or_default())
}
