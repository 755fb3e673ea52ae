use anyhow::Result;

use super::build;
use super::matches_chain;
use super::start_route;
use crate::domain::models::Route;

#[test]
fn it_chains_nested_subcommand_matches() -> Result<()> {
    let matches = build().try_get_matches_from(vec![
        "docchat",
        "--api-url",
        "https://api.example.com",
        "documents",
        "delete",
        "--id",
        "d1",
    ])?;

    let chain = matches_chain(&matches);
    assert_eq!(chain.len(), 3);
    assert_eq!(
        chain[2].get_one::<String>("id"),
        Some(&"d1".to_string())
    );
    assert_eq!(
        chain[2].get_one::<String>("api-url"),
        Some(&"https://api.example.com".to_string())
    );

    return Ok(());
}

#[test]
fn it_requires_a_document_id_to_delete() {
    let res = build().try_get_matches_from(vec!["docchat", "documents", "delete"]);
    assert!(res.is_err());
}

#[test]
fn it_opens_the_document_list_by_default() -> Result<()> {
    let matches = build().try_get_matches_from(vec!["docchat", "open"])?;
    let chain = matches_chain(&matches);

    assert_eq!(start_route(chain[1])?, Route::Documents);

    return Ok(());
}

#[test]
fn it_opens_a_conversation_route() -> Result<()> {
    let matches = build().try_get_matches_from(vec!["docchat", "open", "/doc/d1/c2"])?;
    let chain = matches_chain(&matches);

    assert_eq!(start_route(chain[1])?, Route::chat("d1", "c2"));

    return Ok(());
}

#[test]
fn it_rejects_unknown_routes() -> Result<()> {
    let matches = build().try_get_matches_from(vec!["docchat", "open", "/settings"])?;
    let chain = matches_chain(&matches);

    assert!(start_route(chain[1]).is_err());

    return Ok(());
}
