use std::collections::HashMap;

use types::{
    AccessStatus, Address, BridgeError, BridgeResult, Bytes32, CallKind, CallMessage,
    ExecutionResult, LogEntry, Revision, StatusCode, StorageStatus, TxContext, CALL_FLAG_STATIC,
    RESULT_SIZE, TX_CONTEXT_SIZE,
};
use vm::example::opcodes::*;
use vm::{ExampleVm, HostInterface, Vm};

/// Records every callback and answers from flat maps.
#[derive(Debug, Default)]
struct MockHost {
    storage: HashMap<(Address, Bytes32), Bytes32>,
    balances: HashMap<Address, u128>,
    logs: Vec<LogEntry>,
    calls: Vec<CallMessage>,
    call_inputs: Vec<Vec<u8>>,
    destructed: Vec<(Address, Address)>,
    tx_context: TxContext,
    call_reply: Option<ExecutionResult>,
    scratch: Vec<u8>,
}

impl HostInterface for MockHost {
    fn account_exists(&mut self, address: &Address) -> bool {
        self.balances.contains_key(address)
    }

    fn access_account(&mut self, _address: &Address) -> AccessStatus {
        AccessStatus::Cold
    }

    fn access_storage(&mut self, _address: &Address, _key: &Bytes32) -> AccessStatus {
        AccessStatus::Cold
    }

    fn get_storage(&mut self, address: &Address, key: &Bytes32) -> Bytes32 {
        self.storage
            .get(&(*address, *key))
            .copied()
            .unwrap_or(Bytes32::ZERO)
    }

    fn set_storage(
        &mut self,
        address: &Address,
        key: &Bytes32,
        value: &Bytes32,
    ) -> StorageStatus {
        self.storage.insert((*address, *key), *value);
        StorageStatus::Modified
    }

    fn get_balance(&mut self, address: &Address) -> &[u8] {
        match self.balances.get(address) {
            Some(balance) => {
                self.scratch = Bytes32::from_u128(*balance).0.to_vec();
                &self.scratch
            }
            None => &[],
        }
    }

    fn get_code_size(&mut self, _address: &Address) -> usize {
        0
    }

    fn get_code_hash(&mut self, _address: &Address) -> Bytes32 {
        Bytes32::ZERO
    }

    fn get_code(&mut self, _address: &Address) -> &[u8] {
        &[]
    }

    fn selfdestruct(&mut self, address: &Address, beneficiary: &Address) -> bool {
        self.destructed.push((*address, *beneficiary));
        true
    }

    fn call(&mut self, message: &[u8]) -> [u8; RESULT_SIZE] {
        let (msg, input) = CallMessage::unpack(message).expect("vm sends valid messages");
        self.calls.push(msg);
        self.call_inputs.push(input.to_vec());
        self.call_reply
            .unwrap_or_else(|| ExecutionResult::success(0))
            .encode()
    }

    fn get_tx_context(&mut self) -> [u8; TX_CONTEXT_SIZE] {
        self.tx_context.encode()
    }

    fn get_block_hash(&mut self, _number: i64) -> Bytes32 {
        Bytes32::ZERO
    }

    fn emit_log(&mut self, address: &Address, data: &[u8], topics: &[Bytes32]) -> BridgeResult<()> {
        self.logs.push(LogEntry::new(*address, data, topics)?);
        Ok(())
    }
}

fn to_address(seed: u8) -> Address {
    Address([seed; 20])
}

fn run_with(host: &mut MockHost, msg: CallMessage, input: &[u8], code: &[u8], rev: Revision) -> ExecutionResult {
    let packed = msg.pack(input).unwrap();
    let reply = ExampleVm::new().execute(host, rev, &packed, code);
    ExecutionResult::decode(&reply).unwrap()
}

fn run(host: &mut MockHost, code: &[u8]) -> ExecutionResult {
    let msg = CallMessage::call(to_address(0xaa), to_address(0xbb), 100);
    run_with(host, msg, &[], code, Revision::default())
}

struct TestCase {
    name: &'static str,
    code: Vec<u8>,
    gas: i64,
    expected: ExecutionResult,
}

#[test]
fn status_and_gas_table() {
    let cases = vec![
        TestCase {
            name: "empty code succeeds untouched",
            code: vec![],
            gas: 10,
            expected: ExecutionResult::success(10),
        },
        TestCase {
            name: "stop",
            code: vec![STOP],
            gas: 10,
            expected: ExecutionResult::success(9),
        },
        TestCase {
            name: "add underflows the stack",
            code: vec![ADD],
            gas: 10,
            expected: ExecutionResult::failure(StatusCode::StackUnderflow),
        },
        TestCase {
            name: "undefined opcode",
            code: vec![0x0c],
            gas: 10,
            expected: ExecutionResult::failure(StatusCode::UndefinedInstruction),
        },
        TestCase {
            name: "out of gas",
            code: vec![PUSH1, 1, PUSH1, 2, ADD],
            gas: 2,
            expected: ExecutionResult::failure(StatusCode::OutOfGas),
        },
        TestCase {
            name: "revert keeps gas",
            code: vec![PUSH1, 0, PUSH1, 0, REVERT],
            gas: 10,
            expected: ExecutionResult::revert(7),
        },
        TestCase {
            name: "return beyond memory fails",
            code: vec![PUSH1, 1, 0x61, 0x04, 0x00, RETURN],
            gas: 10,
            expected: ExecutionResult::failure(StatusCode::Failure),
        },
    ];

    for case in cases {
        let mut host = MockHost::default();
        let msg = CallMessage::call(to_address(1), to_address(2), case.gas);
        let result = run_with(&mut host, msg, &[], &case.code, Revision::default());
        assert_eq!(result, case.expected, "case: {}", case.name);
    }
}

#[test]
fn revert_is_undefined_before_byzantium() {
    let mut host = MockHost::default();
    let msg = CallMessage::call(to_address(1), to_address(2), 10);
    let code = [PUSH1, 0, PUSH1, 0, REVERT];

    let result = run_with(&mut host, msg, &[], &code, Revision::SpuriousDragon);
    assert_eq!(result.status_code, StatusCode::UndefinedInstruction);
}

#[test]
fn counter_increments_slot_zero() {
    // sstore(0, add(sload(0), 1))
    let code = [PUSH1, 1, PUSH1, 0, SLOAD, ADD, PUSH1, 0, SSTORE];
    let mut host = MockHost::default();
    host.storage
        .insert((to_address(0xbb), Bytes32::ZERO), Bytes32::from_u64(41));

    let result = run(&mut host, &code);

    assert!(result.is_success());
    assert_eq!(result.gas_left, 100 - 6);
    assert_eq!(
        host.storage[&(to_address(0xbb), Bytes32::ZERO)],
        Bytes32::from_u64(42)
    );
}

#[test]
fn block_number_is_read_from_tx_context() {
    // sstore(0, number())
    let code = [NUMBER, PUSH1, 0, SSTORE];
    let mut host = MockHost::default();
    host.tx_context.block_number = 7_000_001;

    assert!(run(&mut host, &code).is_success());
    assert_eq!(
        host.storage[&(to_address(0xbb), Bytes32::ZERO)],
        Bytes32::from_u64(7_000_001)
    );
}

#[test]
fn calldataload_pads_short_input() {
    // sstore(1, calldataload(0))
    let code = [PUSH1, 0, CALLDATALOAD, PUSH1, 1, SSTORE];
    let mut host = MockHost::default();
    let msg = CallMessage::call(to_address(0xaa), to_address(0xbb), 100);

    run_with(&mut host, msg, &[0xde, 0xad], &code, Revision::default());

    let mut expected = [0u8; 32];
    expected[0] = 0xde;
    expected[1] = 0xad;
    assert_eq!(
        host.storage[&(to_address(0xbb), Bytes32::from_u64(1))],
        Bytes32(expected)
    );
}

#[test]
fn unknown_balance_reads_as_zero() {
    // sstore(0, balance(0xcc..)), sstore(1, balance(0xdd..))
    let mut code = vec![0x73];
    code.extend_from_slice(&[0xcc; 20]);
    code.extend_from_slice(&[BALANCE, PUSH1, 0, SSTORE, 0x73]);
    code.extend_from_slice(&[0xdd; 20]);
    code.extend_from_slice(&[BALANCE, PUSH1, 1, SSTORE]);

    let mut host = MockHost::default();
    host.balances.insert(to_address(0xcc), 1_000);

    assert!(run(&mut host, &code).is_success());
    assert_eq!(
        host.storage[&(to_address(0xbb), Bytes32::ZERO)],
        Bytes32::from_u64(1_000)
    );
    assert_eq!(
        host.storage[&(to_address(0xbb), Bytes32::from_u64(1))],
        Bytes32::ZERO
    );
}

#[test]
fn log2_pops_topics_in_order() {
    // mstore(0, 0xff); log2(31, 1, topic0 = 0x01, topic1 = 0x02)
    let code = [
        PUSH1, 0xff, PUSH1, 0, MSTORE, PUSH1, 0x02, PUSH1, 0x01, PUSH1, 1, PUSH1, 31, 0xa2,
    ];
    let mut host = MockHost::default();

    assert!(run(&mut host, &code).is_success());
    assert_eq!(host.logs.len(), 1);
    assert_eq!(host.logs[0].address, to_address(0xbb));
    assert_eq!(host.logs[0].data, vec![0xff]);
    assert_eq!(
        host.logs[0].topics,
        vec![Bytes32::from_u64(1), Bytes32::from_u64(2)]
    );
}

#[test]
fn call_sends_packed_input_one_level_deeper() {
    // mstore(0, 0xab); call(gas 50, to 0xcc.., value 0, in 31..32, out 0..0)
    let mut code = vec![PUSH1, 0xab, PUSH1, 0, MSTORE];
    code.extend_from_slice(&[PUSH1, 0, PUSH1, 0, PUSH1, 1, PUSH1, 31, PUSH1, 0, 0x73]);
    code.extend_from_slice(&[0xcc; 20]);
    code.extend_from_slice(&[PUSH1, 50, CALL, PUSH1, 0, SSTORE]);

    let mut host = MockHost::default();
    let msg = CallMessage::call(to_address(0xaa), to_address(0xbb), 1_000).at_depth(3);
    let result = run_with(&mut host, msg, &[], &code, Revision::default());

    assert!(result.is_success());
    assert_eq!(host.calls.len(), 1);
    let call = host.calls[0];
    assert_eq!(call.kind, CallKind::Call);
    assert_eq!(call.depth, 4);
    assert_eq!(call.gas, 50);
    assert_eq!(call.sender, to_address(0xbb));
    assert_eq!(call.destination, to_address(0xcc));
    assert_eq!(host.call_inputs[0], vec![0xab]);
    assert_eq!(
        host.storage[&(to_address(0xbb), Bytes32::ZERO)],
        Bytes32::from_u64(1)
    );
}

#[test]
fn failed_call_pushes_zero() {
    let code = [PUSH1, 0, DUP1, DUP1, DUP1, DUP1, DUP1, DUP1, CALL, PUSH1, 0, SSTORE];
    let mut host = MockHost {
        call_reply: Some(ExecutionResult::failure(StatusCode::CallDepthExceeded)),
        ..Default::default()
    };
    host.storage
        .insert((to_address(0xbb), Bytes32::ZERO), Bytes32::from_u64(9));

    assert!(run(&mut host, &code).is_success());
    assert_eq!(
        host.storage[&(to_address(0xbb), Bytes32::ZERO)],
        Bytes32::ZERO
    );
}

#[test]
fn static_frames_cannot_write() {
    let code = [PUSH1, 1, PUSH1, 0, SSTORE];
    let mut host = MockHost::default();
    let mut msg = CallMessage::call(to_address(0xaa), to_address(0xbb), 100);
    msg.flags = CALL_FLAG_STATIC;

    let result = run_with(&mut host, msg, &[], &code, Revision::default());

    assert_eq!(result.status_code, StatusCode::StaticModeViolation);
    assert!(host.storage.is_empty());
}

#[test]
fn selfdestruct_halts_and_reports_beneficiary() {
    let code = [PUSH1, 0x77, SELFDESTRUCT, PUSH1, 1, PUSH1, 0, SSTORE];
    let mut host = MockHost::default();

    assert!(run(&mut host, &code).is_success());
    assert_eq!(host.destructed, vec![(to_address(0xbb), Address::from_word(&Bytes32::from_u64(0x77)))]);
    assert!(host.storage.is_empty());
}

#[test]
fn malformed_message_is_internal_error() {
    let mut host = MockHost::default();
    let reply = ExampleVm::new().execute(&mut host, Revision::LATEST, &[0u8; 12], &[STOP]);
    assert_eq!(
        ExecutionResult::decode(&reply),
        Ok(ExecutionResult::failure(StatusCode::InternalError))
    );
}

#[test]
fn too_many_topics_are_rejected_by_log_entry() {
    let topics = [Bytes32::ZERO; 5];
    let err = LogEntry::new(to_address(1), &[], &topics).unwrap_err();
    assert!(matches!(err, BridgeError::CapabilityViolation(_)));
}
