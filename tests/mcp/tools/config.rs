use lang_lsp::mcp::{LangLspMcpServer, types::GetConfigParams};
use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;

use crate::{McpTestFixture, extract_tool_result_json};

// ============================================================================
// get_config tests
// ============================================================================

#[tokio::test]
async fn test_get_config_defaults() {
    let fixture = McpTestFixture::new().unwrap();
    std::fs::remove_file(fixture.root_path().join(".langlsprc.json")).unwrap();
    std::fs::create_dir(fixture.root_path().join(".git")).unwrap();
    let server = LangLspMcpServer::new();

    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root(),
    });

    let result = server.get_config(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["fromFile"], false);
    assert_eq!(json_result["config"]["dictionarySuffix"], "_en.json");
    assert_eq!(json_result["config"]["defaultNamespace"], "common");
    assert_eq!(json_result["config"]["discovery"], "fd");
    assert_eq!(json_result["config"]["searchProgram"], "fd");
    assert_eq!(json_result["config"]["candidateTtlSecs"], 300);
    assert_eq!(json_result["config"]["dictionaryCapacity"], 50);
}

#[tokio::test]
async fn test_get_config_from_file() {
    let fixture = McpTestFixture::new().unwrap();
    fixture
        .write_config(&json!({
            "discovery": "walk",
            "localeLabel": "EN",
            "ignores": ["**/dist/**"],
            "enableDiagnostics": false
        }))
        .unwrap();

    let server = LangLspMcpServer::new();

    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root(),
    });

    let result = server.get_config(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["fromFile"], true);
    assert_eq!(json_result["config"]["discovery"], "walk");
    assert_eq!(json_result["config"]["localeLabel"], "EN");
    assert_eq!(json_result["config"]["ignores"], json!(["**/dist/**"]));
    assert_eq!(json_result["config"]["enableDiagnostics"], false);
}

#[tokio::test]
async fn test_get_config_invalid_file_is_an_error() {
    let fixture = McpTestFixture::new().unwrap();
    fixture
        .write_config(&json!({ "candidateCapacity": 0 }))
        .unwrap();

    let server = LangLspMcpServer::new();
    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root(),
    });

    let err = server.get_config(params).await.unwrap_err();
    assert!(err.message.contains("Failed to load config"));
}
