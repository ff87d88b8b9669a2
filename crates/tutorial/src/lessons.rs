use std::io::{self, Write};

use observable_primer::{Callbacks, DisposableGroup, EventSource, RxError};

use crate::{load_text::load_text, transcript::Transcript};

pub struct Lesson {
    pub name: &'static str,
    pub run: fn(&Transcript),
}

/// Every example, in the order they are printed.
pub const LESSONS: &[Lesson] = &[
    Lesson { name: "just", run: just },
    Lesson { name: "empty", run: empty },
    Lesson { name: "never", run: never },
    Lesson { name: "range", run: range },
    Lesson { name: "dispose", run: dispose },
    Lesson { name: "compositeDisposable", run: composite_disposable },
    Lesson { name: "create", run: create },
    Lesson { name: "factory", run: factory },
    Lesson { name: "Single", run: single },
];

/// Runs one lesson and writes its header and output to `out`.
pub fn example_of(lesson: &Lesson, out: &mut impl Write) -> io::Result<()> {
    log::debug!("running example {}", lesson.name);
    let transcript = Transcript::default();
    (lesson.run)(&transcript);

    writeln!(out, "--- Example of: {} ---", lesson.name)?;
    for line in transcript.take() {
        writeln!(out, "{line}")?;
    }
    writeln!(out)
}

fn just(out: &Transcript) {
    let out = out.clone();
    EventSource::from_iter(vec![1, 2, 3]).subscribe_next(move |next: i32| out.line(next.to_string()));
}

fn empty(out: &Transcript) {
    let (a, b, c) = (out.clone(), out.clone(), out.clone());
    EventSource::<()>::empty().subscribe_by(
        Callbacks::new()
            .next(move |next: ()| a.line(format!("{next:?}")))
            .complete(move || b.line("complete"))
            .error(move |_: RxError| c.line("error")),
    );
}

fn never(out: &Transcript) {
    let disposables = DisposableGroup::new();

    let source = {
        let (a, b, c, d) = (out.clone(), out.clone(), out.clone(), out.clone());
        EventSource::<String>::never()
            .do_on_next(move |it| a.line(it.clone()))
            .do_on_complete(move || b.line("Completed"))
            .do_on_subscribe(move || c.line("Subscribed"))
            .do_on_dispose(move || d.line("Disposed"))
    };
    let (a, b) = (out.clone(), out.clone());
    let subscription = source.subscribe_by(
        Callbacks::new()
            .next(move |it: String| a.line(it))
            .complete(move || b.line("Completed")),
    );

    disposables.add(subscription);
    disposables.dispose();
}

fn range(out: &Transcript) {
    let (a, b, c) = (out.clone(), out.clone(), out.clone());
    EventSource::range(1, 10).subscribe_by(
        Callbacks::new()
            .next(move |it: i32| a.line(it.to_string()))
            .complete(move || b.line("completed"))
            .error(move |_: RxError| c.line("error")),
    );
}

fn dispose(out: &Transcript) {
    let out = out.clone();
    let source = EventSource::from_iter(vec![1, 2, 3]);
    let subscription = source.subscribe_next(move |it: i32| out.line(it.to_string()));
    subscription.dispose();
}

fn composite_disposable(out: &Transcript) {
    let subscriptions = DisposableGroup::new();

    let out = out.clone();
    let disposable = EventSource::from_iter(vec!["A", "B", "C"]).subscribe_next(move |it: &str| out.line(it));

    subscriptions.add_all([disposable]);
    subscriptions.dispose();
}

fn create(out: &Transcript) {
    let disposables = DisposableGroup::new();

    let source = EventSource::create(|emitter| {
        emitter.next("1");
        emitter.next("?");
        emitter.error(RxError::producer("Error"));
        emitter.complete();
        Ok(())
    });
    let (a, b, c) = (out.clone(), out.clone(), out.clone());
    disposables.add(
        source.subscribe_by(
            Callbacks::new()
                .next(move |it: &str| a.line(it))
                .complete(move || b.line("complete"))
                .error(move |_: RxError| c.line("Error")),
        ),
    );
    disposables.dispose();
}

fn factory(out: &Transcript) {
    let disposables = DisposableGroup::new();

    let flip = std::cell::Cell::new(false);
    let factory = EventSource::defer(move || {
        flip.set(!flip.get());
        if flip.get() {
            EventSource::from_iter(vec![1, 2, 3])
        } else {
            EventSource::from_iter(vec![4, 5, 6])
        }
    });

    for _ in 0..=3 {
        let out = out.clone();
        disposables.add(factory.subscribe_next(move |it: i32| out.line(it.to_string())));
    }
    disposables.dispose();
}

fn single(out: &Transcript) {
    let subscriptions = DisposableGroup::new();

    let (a, b) = (out.clone(), out.clone());
    let observer = load_text("Copyright.txt").subscribe_by(
        move |text: String| a.line(text),
        move |err: RxError| b.line(format!("Error , {err}")),
    );
    subscriptions.add(observer);
}
