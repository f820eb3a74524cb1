//! Molecule bindings for the cobuild envelope and the Spore payloads.
//!
//! Generated at build time from `schemas/cobuild.mol` and
//! `schemas/spore.mol`. The chain types both schemas import (`Byte32`,
//! `Bytes`, `BytesOpt`, `Script`, `Uint32`) are the ones in
//! `ckb_types::packed`.

pub mod blockchain {
    pub use ckb_types::packed::*;
}

#[allow(clippy::all, unused_imports)]
pub mod cobuild {
    include!(concat!(env!("OUT_DIR"), "/cobuild.rs"));
}

#[allow(clippy::all, unused_imports)]
pub mod spore {
    include!(concat!(env!("OUT_DIR"), "/spore.rs"));
}

// Generated types casting for code simplicity
mod casting {
    use ckb_types::{packed::Script, prelude::*};

    use super::cobuild::*;
    use super::spore::*;

    impl From<Script> for Address {
        fn from(value: Script) -> Self {
            Address::new_builder()
                .set(AddressUnion::Script(value))
                .build()
        }
    }

    impl From<CreateSpore> for SporeAction {
        fn from(value: CreateSpore) -> Self {
            SporeAction::new_builder()
                .set(SporeActionUnion::CreateSpore(value))
                .build()
        }
    }

    impl From<TransferSpore> for SporeAction {
        fn from(value: TransferSpore) -> Self {
            SporeAction::new_builder()
                .set(SporeActionUnion::TransferSpore(value))
                .build()
        }
    }

    impl From<MeltSpore> for SporeAction {
        fn from(value: MeltSpore) -> Self {
            SporeAction::new_builder()
                .set(SporeActionUnion::MeltSpore(value))
                .build()
        }
    }

    impl From<CreateCluster> for SporeAction {
        fn from(value: CreateCluster) -> Self {
            SporeAction::new_builder()
                .set(SporeActionUnion::CreateCluster(value))
                .build()
        }
    }

    impl From<TransferCluster> for SporeAction {
        fn from(value: TransferCluster) -> Self {
            SporeAction::new_builder()
                .set(SporeActionUnion::TransferCluster(value))
                .build()
        }
    }

    impl From<SighashAll> for WitnessLayout {
        fn from(value: SighashAll) -> Self {
            WitnessLayout::new_builder()
                .set(WitnessLayoutUnion::SighashAll(value))
                .build()
        }
    }

    impl From<Vec<Action>> for Message {
        fn from(value: Vec<Action>) -> Self {
            let actions = ActionVec::new_builder().set(value).build();
            Message::new_builder().actions(actions).build()
        }
    }
}
