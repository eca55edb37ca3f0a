//! System image administration.
//!
//! Images are uploaded as multipart form data; the file bytes are read from
//! the `<input type="file">` when the form is submitted.

use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::form::{ErrorLine, NoticeLine, TextField};
use crate::net::ConsoleClient;
use crate::net::system_images;
use crate::net::types::{SystemImage, SystemImageUpdate, SystemImageUpload};
use crate::pages::api_failure;
use crate::state::session::Session;
use crate::util::validation::{validate_image_update, validate_image_upload};

const OS_TYPES: [&str; 4] = ["ubuntu", "debian", "alpine", "centos"];

type Catalog = LocalResource<Result<Vec<SystemImage>, String>>;

/// Which slice of the catalog is listed.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Listing {
    All,
    Named(String),
    OsType(String),
}

fn optional(text: String) -> Option<String> {
    Some(text.trim().to_owned()).filter(|t| !t.is_empty())
}

#[component]
pub fn SystemImagesPage() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let client = expect_context::<ConsoleClient>();

    let error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);
    let listing = RwSignal::new(Listing::All);
    let query = RwSignal::new(String::new());
    let editing = RwSignal::new(None::<SystemImage>);

    let catalog: Catalog = LocalResource::new(move || {
        let client = client.clone();
        let listing = listing.get();
        async move {
            let result = match &listing {
                Listing::All => system_images::list_images(&client).await,
                Listing::Named(name) => system_images::search_images(&client, name).await,
                Listing::OsType(os) => system_images::images_by_os_type(&client, os).await,
            };
            result.map_err(|e| api_failure(&client, session, &e))
        }
    });

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        listing.set(optional(query.get_untracked()).map_or(Listing::All, Listing::Named));
    };
    let on_os = move |ev: leptos::ev::Event| {
        let os = event_target_value(&ev);
        listing.set(if os.is_empty() { Listing::All } else { Listing::OsType(os) });
    };

    view! {
        <div class="page images-page">
            <header class="page__header">
                <h1>"System images"</h1>
                <button class="btn" on:click=move |_| catalog.refetch()>"Refresh"</button>
            </header>
            <ErrorLine message=error/>
            <NoticeLine message=notice/>
            <form class="toolbar" on:submit=on_search>
                <TextField label="Search by name" value=query/>
                <button class="btn" type="submit">"Search"</button>
                <label class="field">
                    <span class="field__label">"OS type"</span>
                    <select class="field__input" on:change=on_os>
                        <option value="">"All"</option>
                        {OS_TYPES.iter().map(|os| view! { <option value=*os>{*os}</option> }).collect_view()}
                    </select>
                </label>
            </form>
            <Suspense fallback=|| view! { <p class="page__loading">"Loading images..."</p> }>
                {move || {
                    catalog
                        .get()
                        .map(|result| match result {
                            Ok(list) if list.is_empty() => view! { <p>"No images found."</p> }.into_any(),
                            Ok(list) => {
                                view! {
                                    <table class="data-table">
                                        <thead>
                                            <tr>
                                                <th>"Name"</th>
                                                <th>"OS"</th>
                                                <th>"Version"</th>
                                                <th>"Description"</th>
                                                <th></th>
                                            </tr>
                                        </thead>
                                        <tbody>
                                            {list
                                                .into_iter()
                                                .map(|image| {
                                                    view! {
                                                        <ImageRow
                                                            image=image
                                                            catalog=catalog
                                                            editing=editing
                                                            error=error
                                                            notice=notice
                                                        />
                                                    }
                                                })
                                                .collect_view()}
                                        </tbody>
                                    </table>
                                }
                                    .into_any()
                            }
                            Err(message) => view! { <p class="form__error">{message}</p> }.into_any(),
                        })
                }}
            </Suspense>
            {move || {
                editing
                    .get()
                    .map(|image| view! { <EditImageForm image=image catalog=catalog editing=editing notice=notice/> })
            }}
            <UploadImageForm catalog=catalog notice=notice/>
        </div>
    }
}

#[component]
fn ImageRow(
    image: SystemImage,
    catalog: Catalog,
    editing: RwSignal<Option<SystemImage>>,
    error: RwSignal<Option<String>>,
    notice: RwSignal<Option<String>>,
) -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let client = expect_context::<ConsoleClient>();

    let confirming = RwSignal::new(false);
    let id = image.id;
    let name = image.name.clone();

    // Edit the server's current copy, not the row as it was listed.
    let edit = {
        let client = client.clone();
        move |_: leptos::ev::MouseEvent| {
            let client = client.clone();
            spawn_local(async move {
                match system_images::get_image(&client, id).await {
                    Ok(fresh) => editing.set(Some(fresh)),
                    Err(e) => error.set(Some(api_failure(&client, session, &e))),
                }
            });
        }
    };

    let delete = move |_: leptos::ev::MouseEvent| {
        if !confirming.get_untracked() {
            confirming.set(true);
            return;
        }
        confirming.set(false);
        let client = client.clone();
        let name = name.clone();
        spawn_local(async move {
            match system_images::delete_image(&client, id).await {
                Ok(_) => {
                    notice.set(Some(format!("{name} deleted.")));
                    catalog.refetch();
                }
                Err(e) => error.set(Some(api_failure(&client, session, &e))),
            }
        });
    };

    view! {
        <tr>
            <td>{image.name}</td>
            <td>{image.os_type}</td>
            <td>{image.version}</td>
            <td>{image.description.unwrap_or_default()}</td>
            <td class="data-table__actions">
                <button class="btn btn--small" on:click=edit>"Edit"</button>
                <button class="btn btn--small btn--danger" on:click=delete>
                    {move || if confirming.get() { "Confirm delete" } else { "Delete" }}
                </button>
            </td>
        </tr>
    }
}

#[component]
fn EditImageForm(
    image: SystemImage,
    catalog: Catalog,
    editing: RwSignal<Option<SystemImage>>,
    notice: RwSignal<Option<String>>,
) -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let client = expect_context::<ConsoleClient>();

    let id = image.id;
    let name = RwSignal::new(image.name);
    let os_type = RwSignal::new(image.os_type);
    let version = RwSignal::new(image.version);
    let description = RwSignal::new(image.description.unwrap_or_default());
    let error = RwSignal::new(None::<String>);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let update = SystemImageUpdate {
            name: name.get_untracked().trim().to_owned(),
            os_type: os_type.get_untracked().trim().to_owned(),
            version: version.get_untracked().trim().to_owned(),
            description: optional(description.get_untracked()),
        };
        if let Err(e) = validate_image_update(&update) {
            error.set(Some(e.to_string()));
            return;
        }
        let client = client.clone();
        spawn_local(async move {
            match system_images::update_image(&client, id, &update).await {
                Ok(_) => {
                    notice.set(Some(format!("{} updated.", update.name)));
                    editing.set(None);
                    catalog.refetch();
                }
                Err(e) => error.set(Some(api_failure(&client, session, &e))),
            }
        });
    };

    view! {
        <form class="panel" on:submit=on_submit>
            <h2>"Edit image"</h2>
            <TextField label="Name" value=name/>
            <TextField label="OS type" value=os_type/>
            <TextField label="Version" value=version/>
            <TextField label="Description" value=description/>
            <ErrorLine message=error/>
            <div class="form__actions">
                <button class="btn btn--primary" type="submit">"Save"</button>
                <button class="btn" type="button" on:click=move |_| editing.set(None)>"Cancel"</button>
            </div>
        </form>
    }
}

#[component]
fn UploadImageForm(catalog: Catalog, notice: RwSignal<Option<String>>) -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let client = expect_context::<ConsoleClient>();

    let name = RwSignal::new(String::new());
    let os_type = RwSignal::new(String::new());
    let version = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let pending = RwSignal::new(false);
    let file_input = NodeRef::<html::Input>::new();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let element = file_input.get_untracked();
        let mut upload = SystemImageUpload {
            name: name.get_untracked().trim().to_owned(),
            os_type: os_type.get_untracked().trim().to_owned(),
            version: version.get_untracked().trim().to_owned(),
            description: optional(description.get_untracked()),
            ..SystemImageUpload::default()
        };
        pending.set(true);
        error.set(None);

        let client = client.clone();
        spawn_local(async move {
            if let Some((file_name, bytes)) = read_selected_file(element).await {
                upload.file_name = file_name;
                upload.bytes = bytes;
            }
            if let Err(e) = validate_image_upload(&upload) {
                pending.set(false);
                error.set(Some(e.to_string()));
                return;
            }
            log::info!("uploading image {} ({} bytes)", upload.file_name, upload.bytes.len());
            let result = system_images::create_image(&client, &upload).await;
            pending.set(false);
            match result {
                Ok(_) => {
                    notice.set(Some(format!("{} uploaded.", upload.name)));
                    for field in [name, os_type, version, description] {
                        field.set(String::new());
                    }
                    catalog.refetch();
                }
                Err(e) => error.set(Some(api_failure(&client, session, &e))),
            }
        });
    };

    view! {
        <form class="panel" on:submit=on_submit>
            <h2>"Upload image"</h2>
            <TextField label="Name" value=name/>
            <TextField label="OS type" value=os_type placeholder="ubuntu"/>
            <TextField label="Version" value=version placeholder="22.04"/>
            <TextField label="Description" value=description/>
            <label class="field">
                <span class="field__label">"Image file"</span>
                <input class="field__input" type="file" node_ref=file_input/>
            </label>
            <ErrorLine message=error/>
            <button class="btn btn--primary" type="submit" disabled=move || pending.get()>
                {move || if pending.get() { "Uploading..." } else { "Upload" }}
            </button>
        </form>
    }
}

/// Name and contents of the first selected file.
#[cfg(feature = "csr")]
async fn read_selected_file(element: Option<leptos::web_sys::HtmlInputElement>) -> Option<(String, Vec<u8>)> {
    let file = element?.files()?.get(0)?;
    let buffer = match wasm_bindgen_futures::JsFuture::from(file.array_buffer()).await {
        Ok(buffer) => buffer,
        Err(e) => {
            log::error!("reading {} failed: {e:?}", file.name());
            return None;
        }
    };
    Some((file.name(), js_sys::Uint8Array::new(&buffer).to_vec()))
}

#[cfg(not(feature = "csr"))]
async fn read_selected_file(_element: Option<leptos::web_sys::HtmlInputElement>) -> Option<(String, Vec<u8>)> {
    None
}
