use crate::i18n::t;
use counsel_core::WizardStep;
use yew::prelude::*;

const SHOWN: [WizardStep; 3] = [
    WizardStep::SelectingService,
    WizardStep::Paying,
    WizardStep::Scheduling,
];

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub step: WizardStep,
}

#[function_component(Progress)]
pub fn progress(p: &Props) -> Html {
    if p.step == WizardStep::Confirmed {
        return Html::default();
    }
    html! {
        <ol class="booking-progress">
            { for SHOWN.iter().map(|step| {
                let reached = step.number() <= p.step.number();
                let current = *step == p.step;
                let class = classes!("booking-progress__step", reached.then_some("is-reached"));
                html! {
                    <li {class} aria-current={current.then_some("step")}>
                        <span class="booking-progress__number">{ step.number() }</span>
                        <span class="booking-progress__label">{ t(&format!("booking.steps.{}", step.key())) }</span>
                    </li>
                }
            }) }
        </ol>
    }
}
