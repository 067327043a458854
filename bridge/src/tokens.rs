//! Token registry: the custodied and wrapped token allow-lists.

use cosmwasm_std::{Addr, Storage};
use cw_storage_plus::Item;

use crate::error::ContractError;
use crate::state::{SUPPORTED_TOKENS, SUPPORTED_WRAPPED_TOKENS};

/// Which allow-list a token belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenList {
    /// Held in escrow on the way out, released on the way in
    Supported,
    /// Burned on the way out, minted on the way in
    Wrapped,
}

impl TokenList {
    fn item(self) -> Item<'static, Vec<Addr>> {
        match self {
            TokenList::Supported => SUPPORTED_TOKENS,
            TokenList::Wrapped => SUPPORTED_WRAPPED_TOKENS,
        }
    }

    fn other(self) -> Self {
        match self {
            TokenList::Supported => TokenList::Wrapped,
            TokenList::Wrapped => TokenList::Supported,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenList::Supported => "supported",
            TokenList::Wrapped => "wrapped",
        }
    }
}

pub fn list_tokens(storage: &dyn Storage, list: TokenList) -> Result<Vec<Addr>, ContractError> {
    Ok(list.item().may_load(storage)?.unwrap_or_default())
}

pub fn contains(
    storage: &dyn Storage,
    list: TokenList,
    token: &Addr,
) -> Result<bool, ContractError> {
    Ok(list_tokens(storage, list)?.iter().any(|t| t == token))
}

/// Find the list a token is registered in. A token is never in both.
pub fn token_kind(
    storage: &dyn Storage,
    token: &Addr,
) -> Result<Option<TokenList>, ContractError> {
    for list in [TokenList::Supported, TokenList::Wrapped] {
        if contains(storage, list, token)? {
            return Ok(Some(list));
        }
    }
    Ok(None)
}

/// Append a token to a list. Fails if it is already listed in either list.
pub fn add_token(
    storage: &mut dyn Storage,
    list: TokenList,
    token: &Addr,
) -> Result<(), ContractError> {
    if contains(storage, list.other(), token)? {
        return Err(ContractError::TokenKindConflict {
            token: token.to_string(),
            kind: list.other().as_str().to_string(),
        });
    }

    let mut tokens = list_tokens(storage, list)?;
    if tokens.contains(token) {
        return Err(ContractError::TokenAlreadyExists {
            token: token.to_string(),
        });
    }

    tokens.push(token.clone());
    list.item().save(storage, &tokens)?;
    Ok(())
}

/// Remove a token from a list, shifting later entries down by one index.
pub fn remove_token(
    storage: &mut dyn Storage,
    list: TokenList,
    token: &Addr,
) -> Result<(), ContractError> {
    let mut tokens = list_tokens(storage, list)?;
    let index = tokens
        .iter()
        .position(|t| t == token)
        .ok_or_else(|| ContractError::TokenNotSupported {
            token: token.to_string(),
        })?;

    tokens.remove(index);
    list.item().save(storage, &tokens)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::mock_dependencies;

    #[test]
    fn test_token_is_listed_in_one_list_only() {
        let mut deps = mock_dependencies();
        let token = Addr::unchecked("token_a");

        add_token(deps.as_mut().storage, TokenList::Supported, &token).unwrap();
        let err = add_token(deps.as_mut().storage, TokenList::Supported, &token).unwrap_err();
        assert_eq!(
            err,
            ContractError::TokenAlreadyExists {
                token: "token_a".to_string()
            }
        );

        let err = add_token(deps.as_mut().storage, TokenList::Wrapped, &token).unwrap_err();
        assert_eq!(
            err,
            ContractError::TokenKindConflict {
                token: "token_a".to_string(),
                kind: "supported".to_string()
            }
        );
        assert!(!contains(deps.as_ref().storage, TokenList::Wrapped, &token).unwrap());

        // Once delisted it may move to the other list.
        remove_token(deps.as_mut().storage, TokenList::Supported, &token).unwrap();
        add_token(deps.as_mut().storage, TokenList::Wrapped, &token).unwrap();
        assert_eq!(
            token_kind(deps.as_ref().storage, &token).unwrap(),
            Some(TokenList::Wrapped)
        );
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut deps = mock_dependencies();
        let tokens: Vec<Addr> = ["t0", "t1", "t2", "t3"]
            .iter()
            .map(|t| Addr::unchecked(*t))
            .collect();
        for token in &tokens {
            add_token(deps.as_mut().storage, TokenList::Supported, token).unwrap();
        }

        remove_token(deps.as_mut().storage, TokenList::Supported, &tokens[1]).unwrap();
        assert_eq!(
            list_tokens(deps.as_ref().storage, TokenList::Supported).unwrap(),
            vec![tokens[0].clone(), tokens[2].clone(), tokens[3].clone()]
        );
    }

    #[test]
    fn test_remove_missing_token_fails() {
        let mut deps = mock_dependencies();
        let err = remove_token(
            deps.as_mut().storage,
            TokenList::Wrapped,
            &Addr::unchecked("missing"),
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::TokenNotSupported { .. }));
    }

    #[test]
    fn test_token_kind() {
        let mut deps = mock_dependencies();
        let custodied = Addr::unchecked("custodied");
        let wrapped = Addr::unchecked("wrapped");
        add_token(deps.as_mut().storage, TokenList::Supported, &custodied).unwrap();
        add_token(deps.as_mut().storage, TokenList::Wrapped, &wrapped).unwrap();

        assert_eq!(
            token_kind(deps.as_ref().storage, &custodied).unwrap(),
            Some(TokenList::Supported)
        );
        assert_eq!(
            token_kind(deps.as_ref().storage, &wrapped).unwrap(),
            Some(TokenList::Wrapped)
        );
        assert_eq!(
            token_kind(deps.as_ref().storage, &Addr::unchecked("other")).unwrap(),
            None
        );
    }
}
