use futures::executor::block_on;
use serde_json::json;

use super::*;
use crate::net::test_support::{json_body, signed_in_client};

fn image_json(id: i64, os: &str) -> Value {
    json!({ "id": id, "name": format!("img-{id}"), "os_type": os, "version": "1", "description": null })
}

// =============================================================
// Reads
// =============================================================

#[test]
fn list_reads_two_layers() {
    let (client, transport) = signed_in_client();
    transport.reply(200, json!({ "data": { "data": { "system_images": [image_json(1, "linux")] } } }));
    let images = block_on(list_images(&client)).unwrap();
    assert_eq!(images[0].os_type, "linux");
}

#[test]
fn by_id_reads_data_data() {
    let (client, transport) = signed_in_client();
    transport.reply(200, json!({ "data": { "data": image_json(4, "ubuntu-22.04") } }));
    assert_eq!(block_on(get_image(&client, 4)).unwrap().id, 4);
    assert!(transport.last().url.ends_with("/service-system-image/4"));
}

#[test]
fn search_and_os_type_read_one_layer() {
    let (client, transport) = signed_in_client();
    transport.reply(200, json!({ "data": { "system_images": [image_json(1, "debian")] } }));
    transport.reply(200, json!({ "data": { "system_images": [] } }));

    assert_eq!(block_on(search_images(&client, "deb")).unwrap().len(), 1);
    assert!(block_on(images_by_os_type(&client, "windows")).unwrap().is_empty());

    let urls: Vec<_> = transport.requests().into_iter().map(|r| r.url).collect();
    assert!(urls[0].ends_with("/search/deb"));
    assert!(urls[1].ends_with("/os-type/windows"));
}

#[test]
fn search_text_stays_one_path_segment() {
    let (client, transport) = signed_in_client();
    transport.reply(200, json!({ "data": { "system_images": [] } }));
    transport.reply(200, json!({ "data": { "system_images": [] } }));

    block_on(search_images(&client, "ubuntu 22.04/lts?x#y")).unwrap();
    block_on(images_by_os_type(&client, "red hat")).unwrap();

    let urls: Vec<_> = transport.requests().into_iter().map(|r| r.url).collect();
    assert!(urls[0].ends_with("/service-system-image/search/ubuntu%2022.04%2Flts%3Fx%23y"));
    assert!(urls[1].ends_with("/service-system-image/os-type/red%20hat"));
}

#[test]
fn search_with_list_shape_is_malformed() {
    let (client, transport) = signed_in_client();
    transport.reply(200, json!({ "data": { "data": { "system_images": [] } } }));
    let err = block_on(search_images(&client, "x")).unwrap_err();
    assert_eq!(err, ApiError::MalformedEnvelope("missing `data.system_images`".into()));
}

// =============================================================
// Writes
// =============================================================

#[test]
fn create_sends_multipart_with_file_last() {
    let (client, transport) = signed_in_client();
    let upload = SystemImageUpload {
        name: "Ubuntu".into(),
        os_type: "ubuntu-22.04".into(),
        version: "22.04".into(),
        description: None,
        file_name: "logo.png".into(),
        bytes: vec![1, 2, 3],
    };
    block_on(create_image(&client, &upload)).unwrap();

    let sent = transport.last();
    assert_eq!(sent.method, Method::Post);
    assert_eq!(sent.header("Authorization"), Some("Bearer tok-7"));
    let Body::Multipart(fields) = sent.body else {
        panic!("expected multipart body");
    };
    assert_eq!(fields.len(), 4);
    assert_eq!(fields[0], FormField::Text { name: "name".into(), value: "Ubuntu".into() });
    assert_eq!(
        fields[3],
        FormField::File { name: "image".into(), file_name: "logo.png".into(), bytes: vec![1, 2, 3] }
    );
}

#[test]
fn create_includes_non_empty_description() {
    let upload = SystemImageUpload {
        name: "Alpine".into(),
        os_type: "alpine".into(),
        version: "3.19".into(),
        description: Some("tiny".into()),
        file_name: "a.png".into(),
        bytes: Vec::new(),
    };
    let fields = upload_fields(&upload);
    assert!(fields.contains(&FormField::Text { name: "description".into(), value: "tiny".into() }));
}

#[test]
fn update_and_delete() {
    let (client, transport) = signed_in_client();
    let update = SystemImageUpdate {
        name: "Ubuntu".into(),
        os_type: "ubuntu-24.04".into(),
        version: "24.04".into(),
        description: None,
    };
    block_on(update_image(&client, 4, &update)).unwrap();
    block_on(delete_image(&client, 4)).unwrap();

    let seen = transport.requests();
    assert_eq!(seen[0].method, Method::Put);
    assert_eq!(json_body(&seen[0]), json!({ "name": "Ubuntu", "os_type": "ubuntu-24.04", "version": "24.04" }));
    assert_eq!(seen[1].method, Method::Delete);
}
