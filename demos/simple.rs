use eventcomm::EventAggregator;

eventcomm::declare! {
    /// A randomly picked number
    event Random(i32);
}

fn handle_random(random: &i32) {
    println!("Random: {random}");
}

fn handle_random2(random: &i32) {
    println!("Random2: {random}");
}

fn main() {
    env_logger::init();

    let aggregator = EventAggregator::new();
    let channel = aggregator.get_channel::<Random>().expect("Random channel");

    let token = channel.subscribe(handle_random);
    let _token2 = channel.subscribe(handle_random2);

    token.unsubscribe();

    aggregator
        .get_channel::<Random>()
        .expect("Random channel")
        .publish(10);
}
