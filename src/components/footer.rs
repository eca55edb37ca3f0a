//! Page footer.

use leptos::prelude::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="footer">
            <span>"IAAS Firecracker"</span>
            <span class="footer__divider">"|"</span>
            <span>"Lightweight virtual machines on demand"</span>
        </footer>
    }
}
