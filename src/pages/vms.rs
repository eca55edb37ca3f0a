//! The signed-in user's machines.
//!
//! DESIGN
//! ======
//! The list is one `LocalResource` that every action refetches after it
//! settles. Lifecycle calls go to the VM host with `{user_id, vm_id}`; the
//! create form either targets a chosen cluster directly or lets the cluster
//! service place the machine (see [`crate::state::vm_form`]).

use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;

use crate::components::form::{ErrorLine, NoticeLine, TextField};
use crate::net::error::ApiError;
use crate::net::types::{VirtualMachine, VmAction};
use crate::net::{ConsoleClient, clusters, system_images, vm_host, vm_offers};
use crate::pages::api_failure;
use crate::state::session::Session;
use crate::state::vm_form::{Placement, VmDraft};

type Machines = LocalResource<Result<Vec<VirtualMachine>, String>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Command {
    Start,
    Stop,
    Delete,
}

impl Command {
    fn done(self) -> &'static str {
        match self {
            Self::Start => "started",
            Self::Stop => "stopped",
            Self::Delete => "deleted",
        }
    }
}

async fn send(client: &ConsoleClient, command: Command, action: &VmAction) -> Result<Value, ApiError> {
    match command {
        Command::Start => vm_host::start_vm(client, action).await,
        Command::Stop => vm_host::stop_vm(client, action).await,
        Command::Delete => vm_host::delete_vm(client, action).await,
    }
}

#[component]
pub fn VmsPage() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let client = expect_context::<ConsoleClient>();

    let error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);
    let creating = RwSignal::new(false);

    let machines: Machines = LocalResource::new(move || {
        let client = client.clone();
        async move {
            let Some(user_id) = client.credentials().read_user_id() else {
                return Err("No user is signed in.".to_owned());
            };
            vm_host::list_vms(&client, user_id)
                .await
                .map_err(|e| api_failure(&client, session, &e))
        }
    });

    view! {
        <div class="page vms-page">
            <header class="page__header">
                <h1>"Virtual machines"</h1>
                <button class="btn" on:click=move |_| machines.refetch()>"Refresh"</button>
                <button class="btn btn--primary" on:click=move |_| creating.update(|open| *open = !*open)>
                    {move || if creating.get() { "Close form" } else { "New machine" }}
                </button>
            </header>
            <ErrorLine message=error/>
            <NoticeLine message=notice/>
            <Show when=move || creating.get()>
                <CreateVmForm
                    notice=notice
                    on_created=Callback::new(move |()| {
                        creating.set(false);
                        machines.refetch();
                    })
                />
            </Show>
            <Suspense fallback=|| view! { <p class="page__loading">"Loading machines..."</p> }>
                {move || {
                    machines
                        .get()
                        .map(|result| match result {
                            Ok(vms) if vms.is_empty() => {
                                view! { <p class="vms-page__empty">"No machines yet."</p> }.into_any()
                            }
                            Ok(vms) => {
                                view! {
                                    <table class="data-table">
                                        <thead>
                                            <tr>
                                                <th>"Name"</th>
                                                <th>"Status"</th>
                                                <th>"Size"</th>
                                                <th>"Address"</th>
                                                <th></th>
                                            </tr>
                                        </thead>
                                        <tbody>
                                            {vms
                                                .into_iter()
                                                .map(|vm| {
                                                    view! { <VmRow vm=vm machines=machines error=error notice=notice/> }
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
        </div>
    }
}

#[component]
fn VmRow(
    vm: VirtualMachine,
    machines: Machines,
    error: RwSignal<Option<String>>,
    notice: RwSignal<Option<String>>,
) -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let client = expect_context::<ConsoleClient>();

    let busy = RwSignal::new(false);
    let confirming = RwSignal::new(false);
    let detail = RwSignal::new(None::<String>);

    let action = VmAction::new(vm.user_id, vm.id);
    let status = vm.status;
    let user_id = vm.user_id;
    let name = vm.name.clone();

    let run = {
        let client = client.clone();
        let action = action.clone();
        let name = name.clone();
        move |command: Command| {
            if busy.get_untracked() {
                return;
            }
            busy.set(true);
            confirming.set(false);
            let client = client.clone();
            let action = action.clone();
            let name = name.clone();
            spawn_local(async move {
                let result = send(&client, command, &action).await;
                busy.set(false);
                match result {
                    Ok(_) => {
                        error.set(None);
                        notice.set(Some(format!("{name} {}.", command.done())));
                        machines.refetch();
                    }
                    Err(e) => error.set(Some(api_failure(&client, session, &e))),
                }
            });
        }
    };

    let check_status = {
        let client = client.clone();
        let action = action.clone();
        move |_: leptos::ev::MouseEvent| {
            let client = client.clone();
            let action = action.clone();
            spawn_local(async move {
                let text = match vm_host::vm_status(&client, &action).await {
                    Ok(report) => {
                        let size = report
                            .machine_config
                            .and_then(|c| Some(format!(" ({} vCPU, {} MiB)", c.vcpu_count?, c.mem_size_mib?)))
                            .unwrap_or_default();
                        format!("{}: {}{size}", report.status.name, report.status.status.label())
                    }
                    Err(e) => api_failure(&client, session, &e),
                };
                detail.set(Some(text));
            });
        }
    };

    let show_metrics = {
        let client = client.clone();
        let name = name.clone();
        move |_: leptos::ev::MouseEvent| {
            let client = client.clone();
            let name = name.clone();
            spawn_local(async move {
                let text = match vm_host::vm_metrics(&client, user_id, &name).await {
                    Ok(raw) => serde_json::to_string_pretty(&raw).unwrap_or_else(|_| raw.to_string()),
                    Err(e) => api_failure(&client, session, &e),
                };
                detail.set(Some(text));
            });
        }
    };

    let start = {
        let run = run.clone();
        move |_: leptos::ev::MouseEvent| run(Command::Start)
    };
    let stop = {
        let run = run.clone();
        move |_: leptos::ev::MouseEvent| run(Command::Stop)
    };
    let delete = move |_: leptos::ev::MouseEvent| {
        if confirming.get_untracked() {
            run(Command::Delete);
        } else {
            confirming.set(true);
        }
    };

    let size = match (vm.vcpu_count, vm.memory_size_mib, vm.disk_size_gb) {
        (Some(cpu), Some(mem), Some(disk)) => format!("{cpu} vCPU / {mem} MiB / {disk} GB"),
        _ => "-".to_owned(),
    };
    let status_class = format!("status-pill status-pill--{}", status.label());

    view! {
        <tr>
            <td>{vm.name}</td>
            <td><span class=status_class>{status.label()}</span></td>
            <td>{size}</td>
            <td>{vm.ip_address.unwrap_or_else(|| "-".to_owned())}</td>
            <td class="data-table__actions">
                <button class="btn btn--small" disabled=move || busy.get() || !status.can_start() on:click=start>
                    "Start"
                </button>
                <button class="btn btn--small" disabled=move || busy.get() || !status.can_stop() on:click=stop>
                    "Stop"
                </button>
                <button class="btn btn--small" on:click=check_status>"Status"</button>
                <button class="btn btn--small" on:click=show_metrics>"Metrics"</button>
                <button class="btn btn--small btn--danger" disabled=move || busy.get() on:click=delete>
                    {move || if confirming.get() { "Confirm delete" } else { "Delete" }}
                </button>
            </td>
        </tr>
        {move || {
            detail
                .get()
                .map(|text| {
                    view! {
                        <tr class="data-table__detail">
                            <td colspan="5">
                                <pre>{text}</pre>
                                <button class="btn btn--small" on:click=move |_| detail.set(None)>"Hide"</button>
                            </td>
                        </tr>
                    }
                })
        }}
    }
}

/// Change handler storing the numeric id picked in a `<select>`.
fn pick(target: RwSignal<Option<i64>>) -> impl Fn(leptos::ev::Event) + Copy + 'static {
    move |ev| target.set(event_target_value(&ev).parse::<i64>().ok())
}

/// New-machine form. With `scheduled_only` the cluster picker is hidden and
/// every request goes through host placement.
#[component]
pub(crate) fn CreateVmForm(
    notice: RwSignal<Option<String>>,
    on_created: Callback<()>,
    #[prop(optional)] scheduled_only: bool,
) -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let client = expect_context::<ConsoleClient>();

    let offers = LocalResource::new({
        let client = client.clone();
        move || {
            let client = client.clone();
            async move { vm_offers::active_offers(&client).await.unwrap_or_default() }
        }
    });
    let images = LocalResource::new({
        let client = client.clone();
        move || {
            let client = client.clone();
            async move { system_images::list_images(&client).await.unwrap_or_default() }
        }
    });
    let hosts = LocalResource::new({
        let client = client.clone();
        move || {
            let client = client.clone();
            async move {
                if scheduled_only {
                    return Vec::new();
                }
                clusters::list_clusters(&client).await.unwrap_or_default()
            }
        }
    });

    let name = RwSignal::new(String::new());
    let offer_id = RwSignal::new(None::<i64>);
    let image_id = RwSignal::new(None::<i64>);
    let cluster_id = RwSignal::new(None::<i64>);
    let root_password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let ssh_key = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let pending = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let Some(user_id) = client.credentials().read_user_id() else {
            error.set(Some("No user is signed in.".to_owned()));
            return;
        };
        let draft = VmDraft {
            name: name.get_untracked(),
            offer: offer_id
                .get_untracked()
                .and_then(|id| offers.get_untracked().unwrap_or_default().into_iter().find(|o| o.id == id)),
            image: image_id
                .get_untracked()
                .and_then(|id| images.get_untracked().unwrap_or_default().into_iter().find(|i| i.id == id)),
            cluster_id: if scheduled_only { None } else { cluster_id.get_untracked() },
            root_password: root_password.get_untracked(),
            confirm_password: confirm_password.get_untracked(),
            ssh_public_key: ssh_key.get_untracked(),
        };
        let placement = match draft.build(user_id) {
            Ok(placement) => placement,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        error.set(None);
        pending.set(true);

        let client = client.clone();
        spawn_local(async move {
            let result = match &placement {
                Placement::Direct(request) => vm_host::create_vm(&client, request).await,
                Placement::Scheduled(requirements) => clusters::find_suitable_host(&client, requirements).await,
            };
            pending.set(false);
            match result {
                Ok(_) => {
                    log::info!("machine {} requested", draft.name.trim());
                    notice.set(Some(format!("{} is being created.", draft.name.trim())));
                    on_created.run(());
                }
                Err(e) => error.set(Some(api_failure(&client, session, &e))),
            }
        });
    };

    view! {
        <form class="panel create-vm-form" on:submit=on_submit>
            <h2>"New machine"</h2>
            <TextField label="Name" value=name/>
            <label class="field">
                <span class="field__label">"Offer"</span>
                <select class="field__input" on:change=pick(offer_id)>
                    <option value="">"Choose an offer"</option>
                    {move || {
                        offers
                            .get()
                            .unwrap_or_default()
                            .into_iter()
                            .map(|offer| {
                                let text = format!(
                                    "{} ({} vCPU, {} MiB, {} GB) {:.2}/h",
                                    offer.name,
                                    offer.cpu_count,
                                    offer.memory_size_mib,
                                    offer.disk_size_gb,
                                    offer.price_per_hour,
                                );
                                view! { <option value=offer.id.to_string()>{text}</option> }
                            })
                            .collect_view()
                    }}
                </select>
            </label>
            <label class="field">
                <span class="field__label">"System image"</span>
                <select class="field__input" on:change=pick(image_id)>
                    <option value="">"Choose an image"</option>
                    {move || {
                        images
                            .get()
                            .unwrap_or_default()
                            .into_iter()
                            .map(|image| {
                                let text = format!("{} {} ({})", image.name, image.version, image.os_type);
                                view! { <option value=image.id.to_string()>{text}</option> }
                            })
                            .collect_view()
                    }}
                </select>
            </label>
            <label class="field" class:field--hidden=move || scheduled_only>
                <span class="field__label">"Cluster"</span>
                <select class="field__input" on:change=pick(cluster_id)>
                    <option value="">"Automatic placement"</option>
                    {move || {
                        hosts
                            .get()
                            .unwrap_or_default()
                            .into_iter()
                            .map(|cluster| {
                                view! { <option value=cluster.id.to_string()>{cluster.spec.name}</option> }
                            })
                            .collect_view()
                    }}
                </select>
            </label>
            <TextField label="Root password" value=root_password kind="password"/>
            <TextField label="Confirm root password" value=confirm_password kind="password"/>
            <TextField label="SSH public key (optional)" value=ssh_key placeholder="ssh-ed25519 AAAA..."/>
            <ErrorLine message=error/>
            <button class="btn btn--primary" type="submit" disabled=move || pending.get()>
                {move || if pending.get() { "Creating..." } else { "Create" }}
            </button>
        </form>
    }
}
