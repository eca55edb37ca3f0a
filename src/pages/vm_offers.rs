//! VM offer administration.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::form::{ErrorLine, NoticeLine, TextField};
use crate::net::ConsoleClient;
use crate::net::types::{VmOffer, VmOfferInput};
use crate::net::vm_offers;
use crate::pages::api_failure;
use crate::state::session::Session;
use crate::util::validation::{FieldError, parse_positive, validate_offer};

type Offers = LocalResource<Result<Vec<VmOffer>, String>>;

#[component]
pub fn VmOffersPage() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let client = expect_context::<ConsoleClient>();

    let error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);
    let active_only = RwSignal::new(false);
    let editing = RwSignal::new(None::<VmOffer>);
    let detail = RwSignal::new(None::<String>);

    let offers: Offers = LocalResource::new(move || {
        let client = client.clone();
        let active = active_only.get();
        async move {
            let result = if active {
                vm_offers::active_offers(&client).await
            } else {
                vm_offers::list_offers(&client).await
            };
            result.map_err(|e| api_failure(&client, session, &e))
        }
    });

    view! {
        <div class="page offers-page">
            <header class="page__header">
                <h1>"VM offers"</h1>
                <button class="btn" on:click=move |_| offers.refetch()>"Refresh"</button>
                <label class="toggle">
                    <input
                        type="checkbox"
                        prop:checked=move || active_only.get()
                        on:change=move |ev| active_only.set(event_target_checked(&ev))
                    />
                    "Active only"
                </label>
            </header>
            <ErrorLine message=error/>
            <NoticeLine message=notice/>
            <Suspense fallback=|| view! { <p class="page__loading">"Loading offers..."</p> }>
                {move || {
                    offers
                        .get()
                        .map(|result| match result {
                            Ok(list) if list.is_empty() => view! { <p>"No offers yet."</p> }.into_any(),
                            Ok(list) => {
                                view! {
                                    <table class="data-table">
                                        <thead>
                                            <tr>
                                                <th>"Name"</th>
                                                <th>"vCPU"</th>
                                                <th>"Memory"</th>
                                                <th>"Disk"</th>
                                                <th>"Price / hour"</th>
                                                <th>"Active"</th>
                                                <th></th>
                                            </tr>
                                        </thead>
                                        <tbody>
                                            {list
                                                .into_iter()
                                                .map(|offer| {
                                                    view! {
                                                        <OfferRow
                                                            offer=offer
                                                            offers=offers
                                                            editing=editing
                                                            detail=detail
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
                detail
                    .get()
                    .map(|text| {
                        view! {
                            <section class="panel">
                                <pre>{text}</pre>
                                <button class="btn btn--small" on:click=move |_| detail.set(None)>"Hide"</button>
                            </section>
                        }
                    })
            }}
            {move || {
                let current = editing.get();
                view! { <OfferForm current=current offers=offers editing=editing notice=notice/> }
            }}
        </div>
    }
}

#[component]
fn OfferRow(
    offer: VmOffer,
    offers: Offers,
    editing: RwSignal<Option<VmOffer>>,
    detail: RwSignal<Option<String>>,
    error: RwSignal<Option<String>>,
    notice: RwSignal<Option<String>>,
) -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let client = expect_context::<ConsoleClient>();

    let confirming = RwSignal::new(false);
    let id = offer.id;
    let name = offer.name.clone();

    let show_detail = {
        let client = client.clone();
        move |_: leptos::ev::MouseEvent| {
            let client = client.clone();
            spawn_local(async move {
                let text = match vm_offers::get_offer(&client, id).await {
                    Ok(raw) => serde_json::to_string_pretty(&raw).unwrap_or_else(|_| raw.to_string()),
                    Err(e) => api_failure(&client, session, &e),
                };
                detail.set(Some(text));
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
            match vm_offers::delete_offer(&client, id).await {
                Ok(_) => {
                    notice.set(Some(format!("{name} deleted.")));
                    offers.refetch();
                }
                Err(e) => error.set(Some(api_failure(&client, session, &e))),
            }
        });
    };

    let selected = offer.clone();
    view! {
        <tr>
            <td>{offer.name}</td>
            <td>{offer.cpu_count}</td>
            <td>{format!("{} MiB", offer.memory_size_mib)}</td>
            <td>{format!("{} GB", offer.disk_size_gb)}</td>
            <td>{format!("{:.2}", offer.price_per_hour)}</td>
            <td>{if offer.is_active { "yes" } else { "no" }}</td>
            <td class="data-table__actions">
                <button class="btn btn--small" on:click=show_detail>"Details"</button>
                <button class="btn btn--small" on:click=move |_| editing.set(Some(selected.clone()))>"Edit"</button>
                <button class="btn btn--small btn--danger" on:click=delete>
                    {move || if confirming.get() { "Confirm delete" } else { "Delete" }}
                </button>
            </td>
        </tr>
    }
}

/// Create form when `current` is `None`, edit form otherwise.
#[component]
fn OfferForm(
    current: Option<VmOffer>,
    offers: Offers,
    editing: RwSignal<Option<VmOffer>>,
    notice: RwSignal<Option<String>>,
) -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let client = expect_context::<ConsoleClient>();

    let id = current.as_ref().map(|offer| offer.id);
    let seed = current.as_ref().map(VmOfferInput::from).unwrap_or_default();
    let number = |value: u32| if current.is_some() { value.to_string() } else { String::new() };
    let name = RwSignal::new(seed.name.clone());
    let description = RwSignal::new(seed.description.clone());
    let cpu = RwSignal::new(number(seed.cpu_count));
    let memory = RwSignal::new(number(seed.memory_size_mib));
    let disk = RwSignal::new(number(seed.disk_size_gb));
    let price = RwSignal::new(if current.is_some() { seed.price_per_hour.to_string() } else { String::new() });
    let error = RwSignal::new(None::<String>);

    let read = move || -> Result<VmOfferInput, FieldError> {
        let input = VmOfferInput {
            name: name.get_untracked().trim().to_owned(),
            description: description.get_untracked().trim().to_owned(),
            cpu_count: parse_positive("CPU count", &cpu.get_untracked())?,
            memory_size_mib: parse_positive("memory", &memory.get_untracked())?,
            disk_size_gb: parse_positive("disk", &disk.get_untracked())?,
            price_per_hour: price.get_untracked().trim().parse().map_err(|_| FieldError::NotANumber("price per hour"))?,
        };
        validate_offer(&input)?;
        Ok(input)
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let input = match read() {
            Ok(input) => input,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        error.set(None);
        let client = client.clone();
        spawn_local(async move {
            let result = match id {
                Some(id) => vm_offers::update_offer(&client, id, &input).await,
                None => vm_offers::create_offer(&client, &input).await,
            };
            match result {
                Ok(_) => {
                    notice.set(Some(format!("Offer {} saved.", input.name)));
                    editing.set(None);
                    offers.refetch();
                }
                Err(e) => error.set(Some(api_failure(&client, session, &e))),
            }
        });
    };

    view! {
        <form class="panel" on:submit=on_submit>
            <h2>{if id.is_some() { "Edit offer" } else { "New offer" }}</h2>
            <TextField label="Name" value=name/>
            <TextField label="Description" value=description/>
            <TextField label="vCPUs" value=cpu kind="number"/>
            <TextField label="Memory (MiB)" value=memory kind="number"/>
            <TextField label="Disk (GB)" value=disk kind="number"/>
            <TextField label="Price per hour" value=price kind="number"/>
            <ErrorLine message=error/>
            <div class="form__actions">
                <button class="btn btn--primary" type="submit">"Save"</button>
                <Show when=move || id.is_some()>
                    <button class="btn" type="button" on:click=move |_| editing.set(None)>"Cancel"</button>
                </Show>
            </div>
        </form>
    }
}
