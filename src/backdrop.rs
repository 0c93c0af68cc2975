use crate::constants::*;
use crate::core::{golden_angle, scatter, Particle, PARTICLE_COUNT};
use crate::dom;
use wasm_bindgen::JsCast;
use web_sys as web;

fn spawn_particle(
    document: &web::Document,
    host: &web::Element,
    p: &Particle,
) -> anyhow::Result<()> {
    let el: web::HtmlElement = document
        .create_element("span")
        .map_err(|e| anyhow::anyhow!("create particle: {:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("particle is not an HtmlElement: {:?}", e))?;
    el.set_class_name("particle");
    dom::set_style(&el, "left", &format!("{:.2}%", p.left_pct));
    dom::set_style(&el, "top", &format!("{:.2}%", p.top_pct));
    dom::set_style(&el, "animation-duration", &format!("{:.2}s", p.duration_sec));
    dom::set_style(&el, "animation-delay", &format!("{:.2}s", p.delay_sec));
    host.append_child(&el)
        .map_err(|e| anyhow::anyhow!("append particle: {:?}", e))?;
    Ok(())
}

/// Fill every `[data-particles]` host with decorative particles.
///
/// `scatter` hosts get a random layout per load, `golden` hosts a fixed one.
pub fn populate(document: &web::Document) -> anyhow::Result<usize> {
    let root = document
        .document_element()
        .ok_or_else(|| anyhow::anyhow!("no document element"))?;
    let mut rng = rand::thread_rng();
    let mut hosts = 0;
    for host in dom::query_all(&root, &format!("[{}]", PARTICLES_ATTR)) {
        let particles = match host.get_attribute(PARTICLES_ATTR).as_deref() {
            Some("golden") => golden_angle(PARTICLE_COUNT),
            Some("scatter") => scatter(&mut rng, PARTICLE_COUNT),
            other => {
                log::warn!("[backdrop] unknown particle layout {:?}", other);
                continue;
            }
        };
        for p in &particles {
            spawn_particle(document, &host, p)?;
        }
        hosts += 1;
    }
    Ok(hosts)
}
