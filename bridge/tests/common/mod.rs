//! Shared cw-multi-test harness: validator signers, token contracts and a
//! fully configured bridge.

#![allow(dead_code)]

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    Addr, Binary, Coin, Deps, DepsMut, Empty, Env, MessageInfo, Response, StdResult, Uint128,
};
use cw20::{BalanceResponse, Cw20Coin, Cw20ExecuteMsg, Cw20QueryMsg, MinterResponse};
use cw_multi_test::{App, AppResponse, ContractWrapper, Executor};
use k256::ecdsa::SigningKey;
use k256::elliptic_curve::sec1::ToEncodedPoint;

use validator_bridge::authorizer::{action_digest, Action};
use validator_bridge::hash::{
    address_to_hex, eth_signed_message_hash, instance_domain, pubkey_to_address,
};
use validator_bridge::msg::{ExecuteMsg, InstantiateMsg, NonceResponse, QueryMsg};

/// Denom wrapped by the native wrapper (18 decimals, so wrapping leaves dust)
pub const NATIVE_DENOM: &str = "aluna";
/// Denom the bridge does not wrap
pub const OTHER_DENOM: &str = "uusd";

pub const USER_TOKENS: u128 = 1_000_000_000_000_000_000_000;
pub const USER_NATIVE: u128 = 10_000_000_000_000_000_000;

const VALIDATOR_KEYS: [&str; 4] = [
    "27fe82e9f20da97c4edfb3595b89e8acab93362e054aec78c3a6acec04e820dc",
    "5cd9472be623a9179f146cb76c477016ec7157a44b75eca291ac50c68f4dce06",
    "d30aafd5f7bf07df49f18e05410320882e5cad7c5e55e48500a582b7e7605bb3",
    "1016d0f886dc50b613c75207f188e9cc46aad1381f45bb92a45b0c889ad617e8",
];

/// Key that is never part of the validator set
const OUTSIDER_KEY: &str = "0f6a3c1d2b4e5f60718293a4b5c6d7e8f90a1b2c3d4e5f60718293a4b5c6d7e8";

// ============================================================================
// Validator Signers
// ============================================================================

pub struct Signer {
    key: SigningKey,
}

impl Signer {
    pub fn from_hex(key: &str) -> Self {
        let bytes = hex::decode(key).unwrap();
        Self {
            key: SigningKey::from_slice(&bytes).unwrap(),
        }
    }

    /// Lowercase 0x identity the bridge recovers for this key
    pub fn identity(&self) -> String {
        let point = self.key.verifying_key().as_affine().to_encoded_point(false);
        address_to_hex(&pubkey_to_address(point.as_bytes()).unwrap())
    }

    /// 65-byte `r ++ s ++ v` signature over the EIP-191 hash of `digest`
    pub fn sign(&self, digest: &[u8; 32]) -> Binary {
        let (signature, recovery_id) = self
            .key
            .sign_prehash_recoverable(&eth_signed_message_hash(digest))
            .unwrap();
        let mut bytes = signature.to_bytes().to_vec();
        bytes.push(recovery_id.to_byte() + 27);
        Binary::from(bytes)
    }
}

pub fn validator_signers() -> Vec<Signer> {
    VALIDATOR_KEYS.iter().map(|k| Signer::from_hex(k)).collect()
}

pub fn outsider() -> Signer {
    Signer::from_hex(OUTSIDER_KEY)
}

// ============================================================================
// Contracts
// ============================================================================

fn contract_bridge() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        validator_bridge::contract::execute,
        validator_bridge::contract::instantiate,
        validator_bridge::contract::query,
    )
    .with_migrate(validator_bridge::contract::migrate);
    Box::new(contract)
}

fn contract_cw20() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        cw20_base::contract::execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    );
    Box::new(contract)
}

/// Messages the test native wrapper accepts
#[cw_serde]
pub enum WrapperExecuteMsg {
    /// Credit the sender with the attached native coins
    Deposit {},
    Transfer { recipient: String, amount: Uint128 },
}

fn wrapper_execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: WrapperExecuteMsg,
) -> Result<Response, cw20_base::ContractError> {
    match msg {
        WrapperExecuteMsg::Deposit {} => {
            let amount: Uint128 = info
                .funds
                .iter()
                .filter(|c| c.denom == NATIVE_DENOM)
                .map(|c| c.amount)
                .sum();
            cw20_base::state::BALANCES.update(
                deps.storage,
                &info.sender,
                |balance| -> StdResult<_> { Ok(balance.unwrap_or_default() + amount) },
            )?;
            cw20_base::state::TOKEN_INFO.update(deps.storage, |mut token| -> StdResult<_> {
                token.total_supply += amount;
                Ok(token)
            })?;
            Ok(Response::new()
                .add_attribute("action", "deposit")
                .add_attribute("amount", amount.to_string()))
        }
        WrapperExecuteMsg::Transfer { recipient, amount } => {
            cw20_base::contract::execute_transfer(deps, env, info, recipient, amount)
        }
    }
}

fn wrapper_query(deps: Deps, env: Env, msg: cw20_base::msg::QueryMsg) -> StdResult<Binary> {
    cw20_base::contract::query(deps, env, msg)
}

fn contract_native_wrapper() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        wrapper_execute,
        cw20_base::contract::instantiate,
        wrapper_query,
    );
    Box::new(contract)
}

fn cw20_instantiate(
    name: &str,
    symbol: &str,
    decimals: u8,
    initial_balances: Vec<Cw20Coin>,
    minter: Option<&Addr>,
) -> cw20_base::msg::InstantiateMsg {
    cw20_base::msg::InstantiateMsg {
        name: name.to_string(),
        symbol: symbol.to_string(),
        decimals,
        initial_balances,
        mint: minter.map(|m| MinterResponse {
            minter: m.to_string(),
            cap: None,
        }),
        marketing: None,
    }
}

// ============================================================================
// Suite
// ============================================================================

pub struct Suite {
    pub app: App,
    pub bridge: Addr,
    /// Custodied CW20 with 18 decimals
    pub custodied: Addr,
    /// Bridge-minted CW20 with 8 decimals
    pub wrapped: Addr,
    /// Native wrapper, custodied, 18 decimals
    pub wrapper: Addr,
    pub user: Addr,
    pub relayer: Addr,
    pub signers: Vec<Signer>,
}

/// Bridge with four validators and all three tokens registered
pub fn setup() -> Suite {
    let mut app = App::default();
    let deployer = Addr::unchecked("terra1deployer");
    let user = Addr::unchecked("terra1user");
    let relayer = Addr::unchecked("terra1relayer");

    app.init_modules(|router, _, storage| {
        router
            .bank
            .init_balance(
                storage,
                &user,
                vec![
                    Coin::new(USER_NATIVE, NATIVE_DENOM),
                    Coin::new(1_000_000, OTHER_DENOM),
                ],
            )
            .unwrap();
    });

    let bridge_code = app.store_code(contract_bridge());
    let cw20_code = app.store_code(contract_cw20());
    let wrapper_code = app.store_code(contract_native_wrapper());

    let wrapper = app
        .instantiate_contract(
            wrapper_code,
            deployer.clone(),
            &cw20_instantiate("Wrapped Luna", "WLUNA", 18, vec![], None),
            &[],
            "native-wrapper",
            None,
        )
        .unwrap();

    let signers = validator_signers();
    let bridge = app
        .instantiate_contract(
            bridge_code,
            deployer.clone(),
            &InstantiateMsg {
                validators: signers.iter().map(|s| s.identity()).collect(),
                native_denom: NATIVE_DENOM.to_string(),
                wrapped_native_token: Some(wrapper.to_string()),
                inbound_scaling: None,
            },
            &[],
            "validator-bridge",
            Some(deployer.to_string()),
        )
        .unwrap();

    let custodied = app
        .instantiate_contract(
            cw20_code,
            deployer.clone(),
            &cw20_instantiate(
                "Custodied Token",
                "CST",
                18,
                vec![Cw20Coin {
                    address: user.to_string(),
                    amount: Uint128::new(USER_TOKENS),
                }],
                None,
            ),
            &[],
            "custodied",
            None,
        )
        .unwrap();

    let wrapped = app
        .instantiate_contract(
            cw20_code,
            deployer,
            &cw20_instantiate("Wrapped Token", "WRP", 8, vec![], Some(&bridge)),
            &[],
            "wrapped",
            None,
        )
        .unwrap();

    let mut suite = Suite {
        app,
        bridge,
        custodied,
        wrapped,
        wrapper,
        user,
        relayer,
        signers,
    };

    let custodied = suite.custodied.to_string();
    let wrapper = suite.wrapper.to_string();
    let wrapped = suite.wrapped.to_string();
    suite
        .govern(Action::AddSupportedToken { token: custodied })
        .unwrap();
    suite
        .govern(Action::AddSupportedToken { token: wrapper })
        .unwrap();
    suite
        .govern(Action::AddSupportedWrappedToken { token: wrapped })
        .unwrap();

    suite
}

impl Suite {
    pub fn now(&self) -> u64 {
        self.app.block_info().time.seconds()
    }

    pub fn expiration(&self) -> u64 {
        self.now() + 3600
    }

    pub fn nonce(&self) -> u64 {
        let res: NonceResponse = self
            .app
            .wrap()
            .query_wasm_smart(&self.bridge, &QueryMsg::Nonce {})
            .unwrap();
        res.nonce
    }

    /// Digest of `action` for this bridge at an explicit nonce
    pub fn digest_at(&self, action: &Action, nonce: u64, expiration: u64) -> [u8; 32] {
        let domain = instance_domain(self.bridge.as_str());
        action_digest(action, nonce, &domain, expiration).unwrap()
    }

    /// Signatures of the validators at `indexes` over `action` at `nonce`
    pub fn sign_at(
        &self,
        indexes: &[usize],
        action: &Action,
        nonce: u64,
        expiration: u64,
    ) -> Vec<Binary> {
        let digest = self.digest_at(action, nonce, expiration);
        indexes
            .iter()
            .map(|i| self.signers[*i].sign(&digest))
            .collect()
    }

    /// Signatures of the validators at `indexes` at the current nonce
    pub fn sign(&self, indexes: &[usize], action: &Action, expiration: u64) -> Vec<Binary> {
        self.sign_at(indexes, action, self.nonce(), expiration)
    }

    /// Submit `action` with the given signatures as the relayer
    pub fn submit(
        &mut self,
        action: Action,
        signatures: Vec<Binary>,
        expiration: u64,
    ) -> anyhow::Result<AppResponse> {
        let msg = execute_msg(action, signatures, expiration);
        let relayer = self.relayer.clone();
        let bridge = self.bridge.clone();
        self.app.execute_contract(relayer, bridge, &msg, &[])
    }

    /// Submit `action` signed by a quorum (three of four validators)
    pub fn govern(&mut self, action: Action) -> anyhow::Result<AppResponse> {
        let expiration = self.expiration();
        let signatures = self.sign(&[0, 1, 2], &action, expiration);
        self.submit(action, signatures, expiration)
    }

    pub fn execute(&mut self, sender: &Addr, msg: &ExecuteMsg) -> anyhow::Result<AppResponse> {
        let bridge = self.bridge.clone();
        self.app.execute_contract(sender.clone(), bridge, msg, &[])
    }

    pub fn query<T: serde::de::DeserializeOwned>(&self, msg: &QueryMsg) -> T {
        self.app.wrap().query_wasm_smart(&self.bridge, msg).unwrap()
    }

    pub fn token_balance(&self, token: &Addr, owner: &Addr) -> Uint128 {
        let res: BalanceResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                token,
                &Cw20QueryMsg::Balance {
                    address: owner.to_string(),
                },
            )
            .unwrap();
        res.balance
    }

    pub fn native_balance(&self, owner: &Addr) -> Uint128 {
        self.app
            .wrap()
            .query_balance(owner, NATIVE_DENOM)
            .unwrap()
            .amount
    }

    /// Let the bridge pull `amount` of the custodied token from the user
    pub fn approve(&mut self, amount: u128) {
        let user = self.user.clone();
        let token = self.custodied.clone();
        self.app
            .execute_contract(
                user,
                token,
                &Cw20ExecuteMsg::IncreaseAllowance {
                    spender: self.bridge.to_string(),
                    amount: Uint128::new(amount),
                    expires: None,
                },
                &[],
            )
            .unwrap();
    }

    /// Lock `amount` of the custodied token through the allowance path
    pub fn lock_custodied(&mut self, amount: u128) -> anyhow::Result<AppResponse> {
        self.approve(amount);
        let user = self.user.clone();
        let token = self.custodied.to_string();
        self.execute(
            &user,
            &ExecuteMsg::TransferTokens {
                token,
                amount: Uint128::new(amount),
                destination: "0x2b0e9eb31c3f3bc06437a7df090a2f6a4d658150".to_string(),
            },
        )
    }
}

/// Turn a signed action into the execute message that carries it
pub fn execute_msg(action: Action, signatures: Vec<Binary>, expiration: u64) -> ExecuteMsg {
    match action {
        Action::AddValidator { validator } => ExecuteMsg::AddValidator {
            validator,
            signatures,
            expiration,
        },
        Action::RemoveValidator { validator } => ExecuteMsg::RemoveValidator {
            validator,
            signatures,
            expiration,
        },
        Action::AddSupportedToken { token } => ExecuteMsg::AddSupportedToken {
            token,
            signatures,
            expiration,
        },
        Action::RemoveSupportedToken { token } => ExecuteMsg::RemoveSupportedToken {
            token,
            signatures,
            expiration,
        },
        Action::AddSupportedWrappedToken { token } => ExecuteMsg::AddSupportedWrappedToken {
            token,
            signatures,
            expiration,
        },
        Action::RemoveSupportedWrappedToken { token } => {
            ExecuteMsg::RemoveSupportedWrappedToken {
                token,
                signatures,
                expiration,
            }
        }
        Action::SetPause { paused: true } => ExecuteMsg::Pause {
            signatures,
            expiration,
        },
        Action::SetPause { paused: false } => ExecuteMsg::Unpause {
            signatures,
            expiration,
        },
        Action::CompleteTransfer {
            source_tx_id,
            op_index,
            token,
            recipient,
            amount,
        } => ExecuteMsg::CompleteTransfer {
            source_tx_id,
            op_index,
            token,
            recipient,
            amount,
            signatures,
            expiration,
        },
    }
}

/// Attribute `key` of the bridge's own wasm event
pub fn bridge_attr(res: &AppResponse, bridge: &Addr, key: &str) -> Option<String> {
    res.events
        .iter()
        .filter(|e| e.ty == "wasm")
        .filter(|e| {
            e.attributes
                .iter()
                .any(|a| a.key == "_contract_address" && a.value == bridge.as_str())
        })
        .flat_map(|e| e.attributes.iter())
        .find(|a| a.key == key)
        .map(|a| a.value.clone())
}

/// Root cause of a failed execution, as the contract rendered it
pub fn err_string(res: anyhow::Result<AppResponse>) -> String {
    res.unwrap_err().root_cause().to_string()
}
