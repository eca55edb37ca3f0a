//! Landing page with the product pitch and the current offers.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::net::ConsoleClient;
use crate::net::vm_offers;
use crate::state::session::Session;
use crate::util::route_gate::DASHBOARD_PATH;

const FEATURES: [(&str, &str); 4] = [
    ("Fast boot", "Firecracker microVMs start in well under a second."),
    ("Isolation", "Every machine runs in its own KVM sandbox."),
    ("Pay per hour", "Offers are billed by the hour while the machine runs."),
    ("Root access", "Full control over your machines with SSH keys or a root password."),
];

#[component]
pub fn HomePage() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let client = expect_context::<ConsoleClient>();

    // Offers are best effort here; the section disappears if the call fails.
    let offers = LocalResource::new(move || {
        let client = client.clone();
        async move { vm_offers::active_offers(&client).await.unwrap_or_default() }
    });

    view! {
        <div class="page home-page">
            <section class="home-page__hero">
                <h1>"Virtual machines in seconds"</h1>
                <p>"Launch, stop and monitor lightweight VMs from one console."</p>
                <Show
                    when=move || session.get().is_logged_in()
                    fallback=|| {
                        view! {
                            <div class="home-page__actions">
                                <A href="/signup" attr:class="btn btn--primary">"Get started"</A>
                                <A href="/login" attr:class="btn">"Log in"</A>
                            </div>
                        }
                    }
                >
                    <A href=DASHBOARD_PATH attr:class="btn btn--primary">"Open dashboard"</A>
                </Show>
            </section>

            <section class="home-page__features">
                {FEATURES
                    .iter()
                    .map(|(title, text)| {
                        view! {
                            <article class="feature-card">
                                <h3>{*title}</h3>
                                <p>{*text}</p>
                            </article>
                        }
                    })
                    .collect_view()}
            </section>

            <Suspense fallback=|| ()>
                {move || {
                    offers
                        .get()
                        .filter(|list| !list.is_empty())
                        .map(|list| {
                            view! {
                                <section class="home-page__offers">
                                    <h2>"Offers"</h2>
                                    <div class="offer-grid">
                                        {list
                                            .into_iter()
                                            .map(|offer| {
                                                view! {
                                                    <article class="offer-card">
                                                        <h3>{offer.name}</h3>
                                                        <p class="offer-card__price">
                                                            {format!("{:.2} / hour", offer.price_per_hour)}
                                                        </p>
                                                        <p>
                                                            {format!(
                                                                "{} vCPU, {} MiB RAM, {} GB disk",
                                                                offer.cpu_count,
                                                                offer.memory_size_mib,
                                                                offer.disk_size_gb,
                                                            )}
                                                        </p>
                                                    </article>
                                                }
                                            })
                                            .collect_view()}
                                    </div>
                                </section>
                            }
                        })
                }}
            </Suspense>
        </div>
    }
}
