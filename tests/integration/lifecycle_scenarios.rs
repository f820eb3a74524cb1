//! Integration test: end-to-end spore and cluster lifecycles.
//!
//! Each scenario drives the public operations against an in-memory chain:
//! 1. Create a spore on an empty skeleton
//! 2. Create two spores sharing a cluster through a lock proxy
//! 3. Melt then create on one reused skeleton
//! 4. Transfer a spore to a new lock
//! 5. Reject a cluster reference without a cluster mode
//! 6. Create a cluster, then a spore inside it by consuming the cluster cell

use spore_cobuild::memory::{MemoryChain, MemorySigner};
use spore_cobuild::types::{Cell, CellDep, CellOutput, OutPoint, ScriptHashType};
use spore_cobuild::witness::{cobuild_actions, find_cobuild_witness};
use spore_cobuild::{
    create_clusters, create_spores, melt_spores, transfer_spores, Address, Byte32, ClusterData,
    ClusterMode, ClusterSpec, ProtocolConfig, Script, SporeAction, SporeData, SporeError,
    SporeSpec, SporeTransfer,
};

const CONFIG: &str = r#"{
    "script_info_hash": "0x0000000000000000000000000000000000000000000000000000000000000001",
    "spore": [{
        "version": "v2",
        "code_hash": "0x2222222222222222222222222222222222222222222222222222222222222222",
        "hash_type": "data1",
        "cell_deps": [{ "cell_dep": { "out_point": { "tx_hash": "0x3333333333333333333333333333333333333333333333333333333333333333", "index": 0 }, "dep_type": "code" } }],
        "cobuild": true
    }],
    "cluster": [{
        "version": "v2",
        "code_hash": "0x4444444444444444444444444444444444444444444444444444444444444444",
        "hash_type": "data1",
        "cell_deps": [{ "cell_dep": { "out_point": { "tx_hash": "0x5555555555555555555555555555555555555555555555555555555555555555", "index": 0 }, "dep_type": "code" } }],
        "cobuild": true
    }]
}"#;

fn config() -> ProtocolConfig {
    ProtocolConfig::from_json_str(CONFIG).expect("config should parse")
}

fn lock(arg: u8) -> Script {
    Script::new(Byte32([0x9b; 32]), ScriptHashType::Type, vec![arg; 20])
}

fn spare(tx_hash: u8, index: u32, owner: u8) -> Cell {
    Cell {
        out_point: OutPoint::new(Byte32([tx_hash; 32]), index),
        output: CellOutput::occupied(lock(owner), None, &[]),
        data: Vec::new(),
    }
}

fn entity_cell(type_script: Script, owner: u8, data: Vec<u8>, tx_hash: u8) -> Cell {
    Cell {
        out_point: OutPoint::new(Byte32([tx_hash; 32]), 0),
        output: CellOutput::occupied(lock(owner), Some(type_script), &data),
        data,
    }
}

fn text_spore(text: &str) -> SporeSpec {
    SporeSpec {
        data: SporeData::new("text/plain", text.as_bytes().to_vec()),
        to: None,
    }
}

#[tokio::test]
async fn scenario_create_single_spore_on_empty_skeleton() {
    let config = config();
    let signer = MemorySigner::new(MemoryChain::new(vec![spare(0xa0, 0, 1)]), lock(1));

    let outcome = create_spores(&signer, &config, vec![text_spore("hello")], None, None, None)
        .await
        .expect("create should succeed");

    assert_eq!(outcome.ids.len(), 1);
    assert_eq!(outcome.tx.inputs.len(), 1, "funding input injected");
    assert_eq!(outcome.tx.outputs.len(), 1);

    let output = &outcome.tx.outputs[0];
    let type_script = output.type_.as_ref().expect("spore output is typed");
    assert_eq!(type_script.args, outcome.ids[0].0.to_vec());
    assert_eq!(type_script.code_hash, config.spore[0].code_hash);
    assert_eq!(output.lock, lock(1));
    assert_eq!(output.capacity, output.occupied_capacity(outcome.tx.outputs_data[0].len()));
    assert_eq!(outcome.tx.cell_deps, vec![config.spore[0].cell_deps[0].cell_dep.clone()]);

    let actions = cobuild_actions(&outcome.tx).unwrap();
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].script_info_hash, config.script_info_hash);
    match actions[0].spore_action().unwrap() {
        SporeAction::CreateSpore { spore_id, to, data_hash } => {
            assert_eq!(spore_id, outcome.ids[0]);
            assert_eq!(to, Address::Script(lock(1)));
            assert_eq!(data_hash, spore_cobuild::hash::blake2b_256(&outcome.tx.outputs_data[0]));
        }
        other => panic!("expected CreateSpore, got {other:?}"),
    }
}

#[tokio::test]
async fn scenario_two_spores_share_one_lock_proxy() {
    let config = config();
    let cluster_id = Byte32([0xc1; 32]);
    let cluster = entity_cell(
        config.cluster[0].type_script(&cluster_id),
        2,
        ClusterData::new("Shared", "").pack(),
        0xcc,
    );
    let chain = MemoryChain::new(vec![
        spare(0xa0, 0, 1),
        cluster.clone(),
        spare(0xa2, 0, 2),
        spare(0xa2, 1, 2),
    ]);
    let signer = MemorySigner::new(chain, lock(1));

    let spores = (0..2)
        .map(|i| SporeSpec {
            data: SporeData::new("text/plain", vec![i]).in_cluster(cluster_id),
            to: None,
        })
        .collect();
    let outcome = create_spores(&signer, &config, spores, Some(ClusterMode::LockProxy), None, None)
        .await
        .expect("create should succeed");

    let proxy_inputs = outcome
        .tx
        .inputs
        .iter()
        .filter(|input| input.cell.output.lock == lock(2))
        .count();
    let proxy_outputs = outcome.tx.outputs.iter().filter(|o| o.lock == lock(2)).count();
    assert_eq!(proxy_inputs, 1);
    assert_eq!(proxy_outputs, 1);

    let cluster_deps = outcome
        .tx
        .cell_deps
        .iter()
        .filter(|dep| **dep == CellDep::code(cluster.out_point.clone()))
        .count();
    assert_eq!(cluster_deps, 1);
    assert!(!outcome.tx.has_input(&cluster.out_point), "cluster cell is not consumed");

    let actions = cobuild_actions(&outcome.tx).unwrap();
    assert_eq!(actions.len(), 2);
    for (action, id) in actions.iter().zip(&outcome.ids) {
        assert!(matches!(
            action.spore_action().unwrap(),
            SporeAction::CreateSpore { spore_id, .. } if spore_id == *id
        ));
    }
    assert_ne!(outcome.ids[0], outcome.ids[1]);
}

#[tokio::test]
async fn scenario_melt_then_create_on_reused_skeleton() {
    let config = config();
    let old_id = Byte32([0x51; 32]);
    let old = entity_cell(
        config.spore[0].type_script(&old_id),
        1,
        SporeData::new("text/plain", b"old".to_vec()).pack(),
        0xb0,
    );
    let signer = MemorySigner::new(MemoryChain::new(vec![old.clone()]), lock(1));

    let tx = melt_spores(&signer, &config, vec![old_id], None)
        .await
        .expect("melt should succeed");
    let outcome = create_spores(&signer, &config, vec![text_spore("new")], None, None, Some(tx))
        .await
        .expect("create should succeed");

    assert_eq!(outcome.tx.inputs.len(), 1, "melted spore funds the create");
    let cobuild_witnesses = outcome
        .tx
        .witnesses
        .iter()
        .filter(|w| spore_cobuild::WitnessLayout::decode(w).is_ok())
        .count();
    assert_eq!(cobuild_witnesses, 1);

    let actions = cobuild_actions(&outcome.tx).unwrap();
    assert_eq!(actions.len(), 2);
    assert!(matches!(
        actions[0].spore_action().unwrap(),
        SporeAction::MeltSpore { spore_id, .. } if spore_id == old_id
    ));
    assert!(matches!(
        actions[1].spore_action().unwrap(),
        SporeAction::CreateSpore { spore_id, .. } if spore_id == outcome.ids[0]
    ));
}

#[tokio::test]
async fn scenario_transfer_swaps_only_the_lock() {
    let config = config();
    let id = Byte32([0x52; 32]);
    let cell = entity_cell(
        config.spore[0].type_script(&id),
        1,
        SporeData::new("text/plain", b"moving".to_vec()).pack(),
        0xb1,
    );
    let signer = MemorySigner::new(MemoryChain::new(vec![cell.clone()]), lock(1));

    let tx = transfer_spores(&signer, &config, vec![SporeTransfer { id, to: lock(7) }], None)
        .await
        .expect("transfer should succeed");

    assert_eq!(tx.inputs.len(), 1);
    assert_eq!(tx.inputs[0].cell, cell);
    assert_eq!(tx.outputs.len(), 1);
    assert_eq!(tx.outputs[0].type_, cell.output.type_);
    assert_eq!(tx.outputs[0].capacity, cell.output.capacity);
    assert_eq!(tx.outputs[0].lock, lock(7));
    assert_eq!(tx.outputs_data[0], cell.data);

    let actions = cobuild_actions(&tx).unwrap();
    assert_eq!(actions.len(), 1);
    assert_eq!(
        actions[0].spore_action().unwrap(),
        SporeAction::TransferSpore {
            spore_id: id,
            from: Address::Script(lock(1)),
            to: Address::Script(lock(7)),
        }
    );
}

#[tokio::test]
async fn scenario_cluster_reference_requires_mode() {
    let config = config();
    let signer = MemorySigner::new(MemoryChain::new(vec![spare(0xa0, 0, 1)]), lock(1));
    let before = spore_cobuild::Transaction::new();
    let request = SporeSpec {
        data: SporeData::new("text/plain", b"x".to_vec()).in_cluster(Byte32([0xc1; 32])),
        to: None,
    };

    let err = create_spores(&signer, &config, vec![request], None, None, Some(before))
        .await
        .expect_err("missing cluster mode must fail");

    assert!(matches!(err, SporeError::ClusterModeRequired(_)));
    assert_eq!(err.kind(), spore_cobuild::ErrorKind::Configuration);
    assert_eq!(signer.prepared_count(), 0);
}

#[tokio::test]
async fn scenario_cluster_then_spore_via_cluster_cell() {
    let config = config();
    let signer = MemorySigner::new(MemoryChain::new(vec![spare(0xa0, 0, 1)]), lock(1));

    let created = create_clusters(
        &signer,
        &config,
        vec![ClusterSpec {
            data: ClusterData::new("Gallery", "a cluster"),
            to: None,
        }],
        None,
        None,
    )
    .await
    .expect("cluster create should succeed");
    let cluster_id = created.ids[0];

    // Commit: the funding cell is spent, the cluster cell and change are live.
    let mut chain = MemoryChain::new(vec![spare(0xa1, 0, 1)]);
    chain.insert(Cell {
        out_point: OutPoint::new(Byte32([0xd0; 32]), 0),
        output: created.tx.outputs[0].clone(),
        data: created.tx.outputs_data[0].clone(),
    });
    let signer = MemorySigner::new(chain, lock(1));

    let request = SporeSpec {
        data: SporeData::new("text/plain", b"member".to_vec()).in_cluster(cluster_id),
        to: None,
    };
    let outcome = create_spores(
        &signer,
        &config,
        vec![request],
        Some(ClusterMode::ClusterCell),
        None,
        None,
    )
    .await
    .expect("spore create should succeed");

    let actions = cobuild_actions(&outcome.tx).unwrap();
    assert_eq!(actions.len(), 2);
    assert!(matches!(
        actions[0].spore_action().unwrap(),
        SporeAction::TransferCluster { cluster_id: id, ref from, ref to } if id == cluster_id && from == to
    ));
    assert!(matches!(
        actions[1].spore_action().unwrap(),
        SporeAction::CreateSpore { .. }
    ));
    assert!(find_cobuild_witness(&outcome.tx).unwrap().is_some());
    assert_eq!(outcome.tx.outputs.len(), 2, "cluster reproduced plus the spore");
}
