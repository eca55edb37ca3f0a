//! Signed-in overview: machine counts, allocated resources, quick links.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::usage_bars::UsageBars;
use crate::net::ConsoleClient;
use crate::net::types::VirtualMachine;
use crate::net::vm_host;
use crate::pages::api_failure;
use crate::state::session::Session;
use crate::util::usage::{Allocation, UsageBar, VmCounts, percent};

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let client = expect_context::<ConsoleClient>();

    let username = client.credentials().read_username().unwrap_or_default();

    let machines = LocalResource::new(move || {
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
        <div class="page dashboard-page">
            <header class="page__header">
                <h1>{format!("Welcome, {username}")}</h1>
                <button class="btn" on:click=move |_| machines.refetch()>"Refresh"</button>
            </header>
            <Suspense fallback=|| view! { <p class="page__loading">"Loading machines..."</p> }>
                {move || {
                    machines
                        .get()
                        .map(|result| match result {
                            Ok(vms) => view! { <Summary vms=vms/> }.into_any(),
                            Err(message) => view! { <p class="form__error">{message}</p> }.into_any(),
                        })
                }}
            </Suspense>
            <section class="dashboard-page__links">
                <A href="/vms" attr:class="btn btn--primary">"Manage machines"</A>
                <A href="/profile" attr:class="btn">"Profile"</A>
            </section>
        </div>
    }
}

#[component]
#[allow(clippy::cast_precision_loss)]
fn Summary(vms: Vec<VirtualMachine>) -> impl IntoView {
    let counts = VmCounts::tally(&vms);
    let allocation = Allocation::of(&vms);
    let bars = vec![
        UsageBar::new("Running", percent(counts.running as f64, counts.total as f64)),
        UsageBar::new("Running vCPU", Allocation::running_share(&vms)),
    ];

    view! {
        <section class="stat-grid">
            <Stat label="Machines" value=counts.total.to_string()/>
            <Stat label="Running" value=counts.running.to_string()/>
            <Stat label="Stopped" value=counts.stopped.to_string()/>
            <Stat label="Other" value=counts.other.to_string()/>
        </section>
        <section class="stat-grid">
            <Stat label="vCPUs" value=allocation.vcpus.to_string()/>
            <Stat label="Memory" value=format!("{} MiB", allocation.memory_mib)/>
            <Stat label="Disk" value=format!("{} GB", allocation.disk_gb)/>
        </section>
        <UsageBars bars=bars/>
        <Show when=move || counts.total == 0>
            <p class="dashboard-page__empty">"You have no machines yet."</p>
        </Show>
    }
}

#[component]
fn Stat(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="stat">
            <span class="stat__value">{value}</span>
            <span class="stat__label">{label}</span>
        </div>
    }
}
