use httpmock::prelude::*;
use site_header::core::{ObjectHandler, TemplateStore};
use site_header::domain::model::{
    Emphasis, HeaderLayoutType, SiteHeader, SiteHeaderLayout, SiteHeaderMenuStyle,
    VariantThemeType, WebProperty,
};
use site_header::{
    ApplyingInformation, CreationInformation, LayoutPolicy, LocalTemplateStore,
    ProvisioningEngine, ProvisioningTemplate, RestSiteClient, SiteHeaderError, SiteHeaderHandler,
    TomlConfig, Web,
};
use std::sync::Arc;
use tempfile::TempDir;

const HEADER_SELECT: &str = "HeaderEmphasis,HeaderLayout,MegaMenuEnabled";

fn web_for(server: &MockServer) -> Web {
    Web::new(Arc::new(RestSiteClient::new(&server.base_url(), None, 5)))
}

fn template_with(layout: SiteHeaderLayout, emphasis: Emphasis, menu: SiteHeaderMenuStyle) -> ProvisioningTemplate {
    let mut template = ProvisioningTemplate::new("integration");
    template.header = Some(SiteHeader {
        layout,
        background_emphasis: emphasis,
        menu_style: menu,
    });
    template
}

#[tokio::test]
async fn test_extract_then_provision_extended_strong_mega_menu() {
    let server = MockServer::start();

    let header_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/_api/web")
            .query_param("$select", HEADER_SELECT);
        then.status(200).json_body(serde_json::json!({
            "HeaderEmphasis": 3,
            "HeaderLayout": 4,
            "MegaMenuEnabled": true
        }));
    });
    let url_mock = server.mock(|when, then| {
        when.method(GET).path("/_api/web").query_param("$select", "Url");
        then.status(200)
            .json_body(serde_json::json!({"Url": "https://contoso.example"}));
    });
    // Layout is not part of the body: Extended is not written back
    let chrome_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/_api/web/SetChromeOptions")
            .json_body(serde_json::json!({"headerEmphasis": 3, "megaMenuEnabled": true}));
        then.status(200).body("");
    });

    let engine = ProvisioningEngine::with_default_handlers();

    let mut source = web_for(&server);
    let template = engine
        .extract(&mut source, &CreationInformation::default())
        .await
        .unwrap();
    header_mock.assert();

    let header = template.header.clone().unwrap();
    assert_eq!(header.layout, SiteHeaderLayout::Extended);
    assert_eq!(header.background_emphasis, Emphasis::Strong);
    assert_eq!(header.menu_style, SiteHeaderMenuStyle::MegaMenu);

    let mut target = web_for(&server);
    engine
        .provision(&mut target, &template, &ApplyingInformation::default())
        .await
        .unwrap();

    url_mock.assert();
    chrome_mock.assert();
    assert!(!target.is_loaded(WebProperty::HeaderLayout));
    assert_eq!(target.header_emphasis().unwrap(), VariantThemeType::Strong);
    assert!(target.mega_menu_enabled().unwrap());
}

#[tokio::test]
async fn test_full_layout_policy_writes_extended() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/_api/web");
        then.status(200)
            .json_body(serde_json::json!({"Url": "https://contoso.example"}));
    });
    let chrome_mock = server.mock(|when, then| {
        when.method(POST).path("/_api/web/SetChromeOptions").json_body(
            serde_json::json!({"headerLayout": 4, "headerEmphasis": 0, "megaMenuEnabled": false}),
        );
        then.status(200);
    });

    let template = template_with(
        SiteHeaderLayout::Extended,
        Emphasis::None,
        SiteHeaderMenuStyle::Cascading,
    );
    let applying_info = ApplyingInformation {
        layout_policy: LayoutPolicy::All,
    };

    let mut web = web_for(&server);
    SiteHeaderHandler::new()
        .provision_objects(&mut web, &template, Default::default(), &applying_info)
        .await
        .unwrap();

    chrome_mock.assert();
    assert_eq!(web.header_layout().unwrap(), HeaderLayoutType::Extended);
}

#[tokio::test]
async fn test_unsupported_emphasis_never_reaches_the_site() {
    let server = MockServer::start();
    let url_mock = server.mock(|when, then| {
        when.method(GET).path("/_api/web");
        then.status(200)
            .json_body(serde_json::json!({"Url": "https://contoso.example"}));
    });
    let chrome_mock = server.mock(|when, then| {
        when.method(POST).path("/_api/web/SetChromeOptions");
        then.status(200);
    });

    let template = ProvisioningTemplate::from_json(
        r#"{"id": "t", "header": {"layout": "Standard", "backgroundEmphasis": "Vivid", "menuStyle": "MegaMenu"}}"#,
    )
    .unwrap();

    let mut web = web_for(&server);
    let err = ProvisioningEngine::with_default_handlers()
        .provision(&mut web, &template, &ApplyingInformation::default())
        .await
        .unwrap_err();

    assert!(matches!(err, SiteHeaderError::UnsupportedEmphasis { .. }));
    url_mock.assert_hits(1);
    chrome_mock.assert_hits(0);
}

#[tokio::test]
async fn test_failed_post_keeps_local_properties() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/_api/web");
        then.status(200)
            .json_body(serde_json::json!({"Url": "https://contoso.example"}));
    });
    let chrome_mock = server.mock(|when, then| {
        when.method(POST).path("/_api/web/SetChromeOptions");
        then.status(500).body("Internal error");
    });

    let template = template_with(
        SiteHeaderLayout::Compact,
        Emphasis::Neutral,
        SiteHeaderMenuStyle::Cascading,
    );

    let mut web = web_for(&server);
    let err = SiteHeaderHandler::new()
        .provision_objects(&mut web, &template, Default::default(), &ApplyingInformation::default())
        .await
        .unwrap_err();

    chrome_mock.assert_hits(1);
    assert!(matches!(err, SiteHeaderError::HttpStatus { status: 500, .. }));
    assert!(err.is_retryable());

    // Assigned before the call, not rolled back afterwards
    assert_eq!(web.header_layout().unwrap(), HeaderLayoutType::Compact);
    assert_eq!(web.header_emphasis().unwrap(), VariantThemeType::Neutral);
    assert!(!web.mega_menu_enabled().unwrap());
}

#[tokio::test]
async fn test_template_without_header_makes_no_calls() {
    let server = MockServer::start();
    let any_get = server.mock(|when, then| {
        when.method(GET);
        then.status(200).json_body(serde_json::json!({}));
    });
    let any_post = server.mock(|when, then| {
        when.method(POST);
        then.status(200);
    });

    let template = ProvisioningTemplate::new("no-header");
    let mut web = web_for(&server);
    let handler = SiteHeaderHandler::new();
    assert!(!handler.will_provision(&web, &template, &ApplyingInformation::default()));

    ProvisioningEngine::with_default_handlers()
        .provision(&mut web, &template, &ApplyingInformation::default())
        .await
        .unwrap();

    any_get.assert_hits(0);
    any_post.assert_hits(0);
}

#[tokio::test]
async fn test_missing_property_in_response() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/_api/web");
        then.status(200)
            .json_body(serde_json::json!({"HeaderLayout": 1, "MegaMenuEnabled": true}));
    });

    let mut web = web_for(&server);
    let err = ProvisioningEngine::with_default_handlers()
        .extract(&mut web, &CreationInformation::default())
        .await
        .unwrap_err();

    match err {
        SiteHeaderError::MissingProperty { property } => assert_eq!(property, "HeaderEmphasis"),
        other => panic!("unexpected error: {:?}", other),
    }
    // Present fields of a rejected response are not kept either
    assert!(!web.is_loaded(WebProperty::HeaderLayout));
    assert!(!web.is_loaded(WebProperty::MegaMenuEnabled));
}

#[tokio::test]
async fn test_config_driven_round_trip_through_template_file() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let normalized_path = temp_dir.path().to_str().unwrap().replace('\\', "/");
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET)
            .path("/sites/hr/_api/web")
            .query_param("$select", HEADER_SELECT)
            .header("authorization", "Bearer config-token");
        then.status(200).json_body(serde_json::json!({
            "HeaderEmphasis": 2,
            "HeaderLayout": 2,
            "MegaMenuEnabled": false
        }));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/sites/hr/_api/web")
            .query_param("$select", "Url");
        then.status(200)
            .json_body(serde_json::json!({"Url": "https://contoso.example/sites/hr"}));
    });
    let chrome_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/sites/hr/_api/web/SetChromeOptions")
            .header("authorization", "Bearer config-token")
            .json_body(serde_json::json!({"headerLayout": 2, "headerEmphasis": 2, "megaMenuEnabled": false}));
        then.status(200);
    });

    let config = TomlConfig::from_toml_str(&format!(
        r#"
[site]
url = "{}"
access_token = "config-token"
timeout_seconds = 5

[template]
directory = "{}"
"#,
        server.url("/sites/hr"),
        normalized_path
    ))?;

    let engine = ProvisioningEngine::with_default_handlers();
    let store = LocalTemplateStore::new(normalized_path.clone());

    let mut source = Web::new(Arc::new(RestSiteClient::from_config(&config)));
    let creation_info = CreationInformation {
        template_id: "hr".to_string(),
    };
    let template = engine.extract(&mut source, &creation_info).await?;
    store.save_template("hr.json", &template).await?;

    let loaded = store.load_template("hr.json").await?;
    assert_eq!(loaded.header, template.header);

    let mut target = Web::new(Arc::new(RestSiteClient::from_config(&config)));
    let parser = engine
        .provision(&mut target, &loaded, &config.applying_information())
        .await?;

    chrome_mock.assert();
    assert_eq!(parser.get_token("templateid"), Some("hr"));
    Ok(())
}
