//! Cluster administration: service status, capacity cards, create/edit/delete,
//! and host placement for new machines.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::form::{ErrorLine, NoticeLine, TextField};
use crate::components::usage_bars::UsageBars;
use crate::net::ConsoleClient;
use crate::net::clusters;
use crate::net::types::{Cluster, ClusterInput, ServiceHealth, ServiceInfo};
use crate::pages::api_failure;
use crate::pages::vms::CreateVmForm;
use crate::state::session::Session;
use crate::util::usage::cluster_bars;
use crate::util::validation::{FieldError, parse_positive, validate_cluster};

type Fleet = LocalResource<Result<Vec<Cluster>, String>>;

#[component]
pub fn ClustersPage() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let client = expect_context::<ConsoleClient>();

    let error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);
    let editing = RwSignal::new(None::<Cluster>);
    let placing = RwSignal::new(false);

    let fleet: Fleet = LocalResource::new(move || {
        let client = client.clone();
        async move { clusters::list_clusters(&client).await.map_err(|e| api_failure(&client, session, &e)) }
    });

    view! {
        <div class="page clusters-page">
            <header class="page__header">
                <h1>"Clusters"</h1>
                <button class="btn" on:click=move |_| fleet.refetch()>"Refresh"</button>
                <button class="btn" on:click=move |_| placing.update(|open| *open = !*open)>
                    "Find a host"
                </button>
            </header>
            <ErrorLine message=error/>
            <NoticeLine message=notice/>
            <ServiceStatus/>
            <Show when=move || placing.get()>
                <CreateVmForm
                    notice=notice
                    scheduled_only=true
                    on_created=Callback::new(move |()| {
                        placing.set(false);
                        fleet.refetch();
                    })
                />
            </Show>
            <Suspense fallback=|| view! { <p class="page__loading">"Loading clusters..."</p> }>
                {move || {
                    fleet
                        .get()
                        .map(|result| match result {
                            Ok(list) if list.is_empty() => {
                                view! { <p>"No clusters registered."</p> }.into_any()
                            }
                            Ok(list) => {
                                view! {
                                    <div class="card-grid">
                                        {list
                                            .into_iter()
                                            .map(|cluster| {
                                                view! {
                                                    <ClusterCard
                                                        cluster=cluster
                                                        fleet=fleet
                                                        editing=editing
                                                        error=error
                                                        notice=notice
                                                    />
                                                }
                                            })
                                            .collect_view()}
                                    </div>
                                }
                                    .into_any()
                            }
                            Err(message) => view! { <p class="form__error">{message}</p> }.into_any(),
                        })
                }}
            </Suspense>
            <ClusterForm fleet=fleet editing=editing notice=notice/>
        </div>
    }
}

/// Health and version of the cluster service itself.
#[component]
fn ServiceStatus() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let client = expect_context::<ConsoleClient>();

    let status: LocalResource<Result<(ServiceHealth, ServiceInfo), String>> = LocalResource::new(move || {
        let client = client.clone();
        async move {
            let health = clusters::cluster_health(&client).await;
            let info = clusters::cluster_info(&client).await;
            health.and_then(|h| info.map(|i| (h, i))).map_err(|e| api_failure(&client, session, &e))
        }
    });

    view! {
        <section class="panel service-status">
            <header class="service-status__header">
                <h2>"Cluster service"</h2>
                <button class="btn btn--small" on:click=move |_| status.refetch()>"Check"</button>
            </header>
            <Suspense fallback=|| view! { <p class="page__loading">"Checking service..."</p> }>
                {move || {
                    status
                        .get()
                        .map(|result| match result {
                            Ok((health, info)) => {
                                let pill = if health.is_up() {
                                    "status-pill status-pill--running"
                                } else {
                                    "status-pill status-pill--error"
                                };
                                let label = if health.status.is_empty() { "unknown".to_owned() } else { health.status };
                                view! {
                                    <dl class="service-status__facts">
                                        <dt>"Status"</dt>
                                        <dd><span class=pill>{label}</span></dd>
                                        <dt>"Application"</dt>
                                        <dd>{info.app}</dd>
                                        <dt>"Version"</dt>
                                        <dd>{info.version}</dd>
                                    </dl>
                                }
                                    .into_any()
                            }
                            Err(message) => {
                                view! {
                                    <p>
                                        <span class="status-pill status-pill--error">"unreachable"</span>
                                        " "
                                        {message}
                                    </p>
                                }
                                    .into_any()
                            }
                        })
                }}
            </Suspense>
        </section>
    }
}

#[component]
fn ClusterCard(
    cluster: Cluster,
    fleet: Fleet,
    editing: RwSignal<Option<Cluster>>,
    error: RwSignal<Option<String>>,
    notice: RwSignal<Option<String>>,
) -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let client = expect_context::<ConsoleClient>();

    let confirming = RwSignal::new(false);
    let detail = RwSignal::new(None::<String>);
    let id = cluster.id;
    let bars = cluster_bars(&cluster).to_vec();
    let spec = cluster.spec.clone();

    let show_detail = {
        let client = client.clone();
        move |_: leptos::ev::MouseEvent| {
            if detail.get_untracked().is_some() {
                detail.set(None);
                return;
            }
            let client = client.clone();
            spawn_local(async move {
                let text = match clusters::get_cluster(&client, id).await {
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
        spawn_local(async move {
            match clusters::delete_cluster(&client, id).await {
                Ok(_) => {
                    log::info!("deleted cluster {id}");
                    notice.set(Some("Cluster deleted.".to_owned()));
                    fleet.refetch();
                }
                Err(e) => error.set(Some(api_failure(&client, session, &e))),
            }
        });
    };

    view! {
        <article class="cluster-card">
            <header class="cluster-card__header">
                <h3>{spec.name}</h3>
                <span class="cluster-card__ip">{spec.ip}</span>
            </header>
            <p class="cluster-card__meta">
                {format!("{} ({} cores), MAC {}", spec.processor, spec.number_of_core, spec.mac_address)}
            </p>
            <p class="cluster-card__meta">
                {format!(
                    "RAM {}/{} GB free, storage {}/{} GB free",
                    spec.available_ram,
                    spec.ram,
                    spec.available_rom,
                    spec.rom,
                )}
            </p>
            <UsageBars bars=bars/>
            {move || detail.get().map(|text| view! { <pre class="cluster-card__detail">{text}</pre> })}
            <footer class="cluster-card__actions">
                <button class="btn btn--small" on:click=show_detail>"Details"</button>
                <button class="btn btn--small" on:click=move |_| editing.set(Some(cluster.clone()))>"Edit"</button>
                <button class="btn btn--small btn--danger" on:click=delete>
                    {move || if confirming.get() { "Confirm delete" } else { "Delete" }}
                </button>
            </footer>
        </article>
    }
}

/// Whole-number field that may be zero.
fn parse_count(field: &'static str, raw: &str) -> Result<u32, FieldError> {
    raw.trim().parse().map_err(|_| FieldError::NotANumber(field))
}

#[derive(Clone, Copy)]
struct ClusterFields {
    name: RwSignal<String>,
    mac_address: RwSignal<String>,
    ip: RwSignal<String>,
    rom: RwSignal<String>,
    available_rom: RwSignal<String>,
    ram: RwSignal<String>,
    available_ram: RwSignal<String>,
    processor: RwSignal<String>,
    available_processor: RwSignal<String>,
    number_of_core: RwSignal<String>,
}

impl ClusterFields {
    fn new() -> Self {
        let blank = || RwSignal::new(String::new());
        Self {
            name: blank(),
            mac_address: blank(),
            ip: blank(),
            rom: blank(),
            available_rom: blank(),
            ram: blank(),
            available_ram: blank(),
            processor: blank(),
            available_processor: blank(),
            number_of_core: blank(),
        }
    }

    fn fill(self, input: &ClusterInput) {
        self.name.set(input.name.clone());
        self.mac_address.set(input.mac_address.clone());
        self.ip.set(input.ip.clone());
        self.rom.set(input.rom.to_string());
        self.available_rom.set(input.available_rom.to_string());
        self.ram.set(input.ram.to_string());
        self.available_ram.set(input.available_ram.to_string());
        self.processor.set(input.processor.clone());
        self.available_processor.set(input.available_processor.to_string());
        self.number_of_core.set(input.number_of_core.to_string());
    }

    fn clear(self) {
        let all = [
            self.name,
            self.mac_address,
            self.ip,
            self.rom,
            self.available_rom,
            self.ram,
            self.available_ram,
            self.processor,
            self.available_processor,
            self.number_of_core,
        ];
        for field in all {
            field.set(String::new());
        }
    }

    fn read(self) -> Result<ClusterInput, FieldError> {
        let input = ClusterInput {
            name: self.name.get_untracked().trim().to_owned(),
            mac_address: self.mac_address.get_untracked().trim().to_owned(),
            ip: self.ip.get_untracked().trim().to_owned(),
            rom: parse_positive("storage", &self.rom.get_untracked())?,
            available_rom: parse_count("available storage", &self.available_rom.get_untracked())?,
            ram: parse_positive("memory", &self.ram.get_untracked())?,
            available_ram: parse_count("available memory", &self.available_ram.get_untracked())?,
            processor: self.processor.get_untracked().trim().to_owned(),
            available_processor: self
                .available_processor
                .get_untracked()
                .trim()
                .parse()
                .map_err(|_| FieldError::NotANumber("available processor"))?,
            number_of_core: parse_positive("core count", &self.number_of_core.get_untracked())?,
        };
        validate_cluster(&input)?;
        Ok(input)
    }
}

#[component]
fn ClusterForm(fleet: Fleet, editing: RwSignal<Option<Cluster>>, notice: RwSignal<Option<String>>) -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let client = expect_context::<ConsoleClient>();

    let fields = ClusterFields::new();
    let error = RwSignal::new(None::<String>);

    Effect::new(move |_| match editing.get() {
        Some(cluster) => fields.fill(&cluster.spec),
        None => fields.clear(),
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let input = match fields.read() {
            Ok(input) => input,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        error.set(None);
        let target = editing.get_untracked().map(|c| c.id);
        let client = client.clone();
        spawn_local(async move {
            let result = match target {
                Some(id) => clusters::update_cluster(&client, id, &input).await,
                None => clusters::create_cluster(&client, &input).await,
            };
            match result {
                Ok(_) => {
                    notice.set(Some(format!("Cluster {} saved.", input.name)));
                    editing.set(None);
                    fields.clear();
                    fleet.refetch();
                }
                Err(e) => error.set(Some(api_failure(&client, session, &e))),
            }
        });
    };

    view! {
        <form class="panel cluster-form" on:submit=on_submit>
            <h2>{move || if editing.get().is_some() { "Edit cluster" } else { "New cluster" }}</h2>
            <TextField label="Name" value=fields.name/>
            <TextField label="MAC address" value=fields.mac_address placeholder="00:1a:2b:3c:4d:5e"/>
            <TextField label="IP address" value=fields.ip/>
            <TextField label="Storage (GB)" value=fields.rom kind="number"/>
            <TextField label="Available storage (GB)" value=fields.available_rom kind="number"/>
            <TextField label="Memory (GB)" value=fields.ram kind="number"/>
            <TextField label="Available memory (GB)" value=fields.available_ram kind="number"/>
            <TextField label="Processor" value=fields.processor/>
            <TextField label="Available processor (%)" value=fields.available_processor kind="number"/>
            <TextField label="Cores" value=fields.number_of_core kind="number"/>
            <ErrorLine message=error/>
            <div class="form__actions">
                <button class="btn btn--primary" type="submit">"Save"</button>
                <Show when=move || editing.get().is_some()>
                    <button class="btn" type="button" on:click=move |_| editing.set(None)>"Cancel"</button>
                </Show>
            </div>
        </form>
    }
}
