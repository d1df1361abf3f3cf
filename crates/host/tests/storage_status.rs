mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::{call_child, to_address, ScriptVm};
use host::Host;
use state::State;
use types::{Bytes32, CallMessage, ExecutionResult, StorageStatus, TxContext};

struct TestCase {
    name: &'static str,
    /// Base value of the slot; `None` means the account does not exist.
    base: Option<u64>,
    writes: Vec<(u64, StorageStatus)>,
}

fn slot() -> Bytes32 {
    Bytes32::from_u64(1)
}

#[test]
fn storage_write_classification() {
    let contract = to_address(0xcc);
    let cases = vec![
        TestCase {
            name: "fresh account add, rewrite, repeat, delete",
            base: None,
            writes: vec![
                (5, StorageStatus::Added),
                (7, StorageStatus::ModifiedAgain),
                (7, StorageStatus::Unchanged),
                (0, StorageStatus::Deleted),
            ],
        },
        TestCase {
            name: "existing account first write of the same value",
            base: Some(9),
            writes: vec![(9, StorageStatus::Unchanged)],
        },
        TestCase {
            name: "existing account first write of a new value",
            base: Some(9),
            writes: vec![
                (3, StorageStatus::Modified),
                (4, StorageStatus::ModifiedAgain),
                (0, StorageStatus::Deleted),
            ],
        },
        TestCase {
            name: "existing account empty slot",
            base: Some(0),
            writes: vec![(1, StorageStatus::Added)],
        },
        TestCase {
            name: "rewrite after delete starts from zero",
            base: Some(9),
            writes: vec![(0, StorageStatus::Deleted), (9, StorageStatus::Added)],
        },
        TestCase {
            // Zero written to a slot that never held a value still reports Deleted.
            name: "delete of a never-set slot",
            base: None,
            writes: vec![(0, StorageStatus::Deleted), (0, StorageStatus::Deleted)],
        },
    ];

    for case in cases {
        let mut state = State::new();
        if let Some(value) = case.base {
            state.set_storage(contract, slot(), Bytes32::from_u64(value));
        }

        let seen = Rc::new(RefCell::new(Vec::new()));
        let recorder = Rc::clone(&seen);
        let values: Vec<u64> = case.writes.iter().map(|(value, _)| *value).collect();
        let vm = ScriptVm::new(move |host, msg, _code| {
            for value in &values {
                let status = host.set_storage(&msg.destination, &slot(), &Bytes32::from_u64(*value));
                recorder.borrow_mut().push(status);
            }
            ExecutionResult::success(0)
        });

        let mut host = Host::new(state, &vm, TxContext::default());
        let message = CallMessage::call(to_address(0xaa), contract, 100);
        host.execute(&message, &[]).unwrap();

        let expected: Vec<StorageStatus> = case.writes.iter().map(|(_, status)| *status).collect();
        assert_eq!(*seen.borrow(), expected, "case: {}", case.name);
    }
}

#[test]
fn deletion_is_visible_to_later_reads_in_the_frame() {
    let contract = to_address(0xcc);
    let mut state = State::new();
    state.set_storage(contract, slot(), Bytes32::from_u64(9));

    let read = Rc::new(RefCell::new(None));
    let recorder = Rc::clone(&read);
    let vm = ScriptVm::new(move |host, msg, _code| {
        host.set_storage(&msg.destination, &slot(), &Bytes32::ZERO);
        *recorder.borrow_mut() = Some(host.get_storage(&msg.destination, &slot()));
        ExecutionResult::success(0)
    });

    let mut host = Host::new(state, &vm, TxContext::default());
    let execution = host
        .execute(&CallMessage::call(to_address(0xaa), contract, 100), &[])
        .unwrap();

    assert_eq!(*read.borrow(), Some(Bytes32::ZERO));
    let account = &execution.diff.accounts[&contract];
    assert!(account.storage.is_empty());
    assert!(account.storage_written.contains(&slot()));
}

#[test]
fn unknown_account_reads_zero() {
    let read = Rc::new(RefCell::new(None));
    let recorder = Rc::clone(&read);
    let vm = ScriptVm::new(move |host, _msg, _code| {
        *recorder.borrow_mut() = Some(host.get_storage(&to_address(0x42), &slot()));
        ExecutionResult::success(0)
    });

    let mut host = Host::new(State::new(), &vm, TxContext::default());
    host.execute(&CallMessage::call(to_address(0xaa), to_address(0xcc), 100), &[])
        .unwrap();

    assert_eq!(*read.borrow(), Some(Bytes32::ZERO));
}

#[test]
fn child_classifies_against_parent_writes() {
    let contract = to_address(0xcc);
    let statuses = Rc::new(RefCell::new(Vec::new()));
    let recorder = Rc::clone(&statuses);
    let vm = ScriptVm::new(move |host, msg, _code| {
        if msg.depth == 0 {
            recorder
                .borrow_mut()
                .push(host.set_storage(&contract, &slot(), &Bytes32::from_u64(5)));
            let child = CallMessage::call(msg.destination, msg.destination, 50);
            call_child(host, &child, &[])
        } else {
            assert_eq!(host.get_storage(&contract, &slot()), Bytes32::from_u64(5));
            recorder
                .borrow_mut()
                .push(host.set_storage(&contract, &slot(), &Bytes32::from_u64(6)));
            ExecutionResult::success(0)
        }
    });

    let mut host = Host::new(State::new(), &vm, TxContext::default());
    let execution = host
        .execute(&CallMessage::call(to_address(0xaa), contract, 100), &[])
        .unwrap();

    assert_eq!(
        *statuses.borrow(),
        vec![StorageStatus::Added, StorageStatus::Modified]
    );
    assert_eq!(
        execution.diff.accounts[&contract].storage[&slot()],
        Bytes32::from_u64(6)
    );
}
