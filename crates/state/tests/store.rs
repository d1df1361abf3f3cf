use state::{Account, AccountStore, State, EMPTY_CODE_HASH, EMPTY_STORAGE_ROOT};
use types::{Address, Bytes32};

fn to_address(seed: u8) -> Address {
    Address([seed; 20])
}

#[test]
fn unknown_account_reads_as_empty() {
    let state = State::new();
    let addr = to_address(0x01);

    assert!(!state.exists(&addr));
    assert_eq!(state.lookup(&addr), None);
    assert!(state.code(&addr).is_empty());
    assert_eq!(state.storage(&addr, &Bytes32::from_u64(1)), Bytes32::ZERO);
}

#[test]
fn record_reports_empty_hashes_for_fresh_account() {
    let mut state = State::new();
    let addr = to_address(0x02);
    state.set_balance(addr, 500);

    let record = state.lookup(&addr).expect("account exists");
    assert_eq!(record.balance, 500);
    assert_eq!(record.nonce, 0);
    assert_eq!(record.code_hash, EMPTY_CODE_HASH);
    assert_eq!(record.storage_root, EMPTY_STORAGE_ROOT);
}

#[test]
fn deployed_code_changes_code_hash() {
    let mut state = State::new();
    let addr = to_address(0x03);
    state.deploy_contract(addr, vec![0x60, 0x00, 0x00]);

    assert_eq!(state.code(&addr), &[0x60, 0x00, 0x00]);
    assert_ne!(state.lookup(&addr).unwrap().code_hash, EMPTY_CODE_HASH);
}

#[test]
fn zero_base_write_clears_slot() {
    let mut state = State::new();
    let addr = to_address(0x04);
    let key = Bytes32::from_u64(7);

    state.set_storage(addr, key, Bytes32::from_u64(9));
    assert_eq!(state.storage(&addr, &key), Bytes32::from_u64(9));
    assert_ne!(state.lookup(&addr).unwrap().storage_root, EMPTY_STORAGE_ROOT);

    state.set_storage(addr, key, Bytes32::ZERO);
    assert_eq!(state.storage(&addr, &key), Bytes32::ZERO);
    assert_eq!(state.lookup(&addr).unwrap().storage_root, EMPTY_STORAGE_ROOT);
}

#[test]
fn create_account_is_idempotent() {
    let mut state = State::new();
    let addr = to_address(0x05);

    assert!(state.create_account(&addr));
    assert!(!state.create_account(&addr));
    assert_eq!(state.get_account(&addr), Some(&Account::default()));
}

#[test]
fn create_account_keeps_existing_balance() {
    let mut state = State::new();
    let addr = to_address(0x06);
    state.accounts.insert(addr, Account::with_balance(42));

    assert!(!state.create_account(&addr));
    assert_eq!(state.lookup(&addr).unwrap().balance, 42);
}
